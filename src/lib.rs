pub mod bench;
pub mod config;
pub mod eager;
pub mod engine;
pub mod errors;
pub mod frame;
pub mod generate;
pub mod lazy;
pub mod model;
pub mod observability;
pub mod random;
pub mod report;
pub mod timing;

pub use engine::{EngineKind, FrameEngine};
pub use errors::{BenchError, BenchResult};
