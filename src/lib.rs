#![allow(warnings)]

pub mod apis;
pub mod arguments;
pub mod config;
pub mod errors; // Structured error handling
pub mod filtering;
pub mod logger;
pub mod tokens;
pub mod webserver;
