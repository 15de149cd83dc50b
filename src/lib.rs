pub mod charts;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod stats;
pub mod types;
