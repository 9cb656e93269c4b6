pub mod cli;
pub mod config;
pub mod core;
pub mod detectors;
pub mod pipeline;
pub mod sources;

pub use crate::core::engine::Engine;
pub use crate::core::error::SentinelError;
pub use crate::core::types::{RiskLevel, RiskSignal, ScanResult};
