// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod model;
pub mod session;
pub mod specs;

pub mod export;
pub mod file;
pub mod progress;
pub mod runner;
pub mod store;

pub use error::ScrapeError;
