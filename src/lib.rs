pub mod core;
pub mod text;
pub mod error;
pub mod config;
pub mod cli;
pub mod bench;
