//! Engine, data model and the ambient pieces around it.

pub mod domain;
pub mod engine;
pub mod error;
pub mod output;
pub mod stats;
pub mod time;
pub mod types;
