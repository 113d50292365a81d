pub mod config;
pub mod error;
pub mod output;
pub mod processor;
pub mod table;
