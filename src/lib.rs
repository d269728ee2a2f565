// ================================
// src/lib.rs
// ================================
pub mod config;
pub mod control;
pub mod error;
pub mod node;
pub mod scan;

pub use config::{Params, ReflexConfig};
pub use control::{MotionCommand, Reaction, ReflexController};
pub use error::ConfigError;
pub use node::{handle_scan, CommandSink, ReflexNode};
pub use scan::{RangeScan, Side};
