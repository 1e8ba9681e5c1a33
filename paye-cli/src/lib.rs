pub mod app;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod currency;
pub mod logging;
pub mod report;
pub mod utils;
