#![deny(clippy::all)]

pub mod domain;
pub mod key;
pub mod ports;
pub mod service;
pub mod stats;
pub mod sweeper;
pub mod ttl;

pub use service::MatrixCacheService;
pub use stats::StatsReporter;
