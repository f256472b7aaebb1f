pub mod chart;
pub mod client;
pub mod config;
pub mod desk;
pub mod domain;
pub mod execution;
pub mod extract;
pub mod logging;
pub mod notify;
pub mod prompt;
pub mod wallet;
