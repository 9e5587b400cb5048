pub mod config;
pub mod error;
pub mod parity;
pub mod queue;
pub mod scenario;
pub mod sort;
