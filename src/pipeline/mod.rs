pub mod normalizer;
pub mod scorer;
