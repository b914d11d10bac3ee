pub mod address;
pub mod config;
pub mod constants;
pub mod error;
pub mod geocode;
pub mod input;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod types;
