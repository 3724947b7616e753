pub mod config;
pub mod email;
pub mod messaging;
pub mod pdf;
pub mod persistence;
pub mod storage;
pub mod telemetry;
