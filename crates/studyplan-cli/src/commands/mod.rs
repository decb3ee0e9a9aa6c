pub mod config;
pub mod plan;
pub mod session;
pub mod stats;
pub mod subject;
