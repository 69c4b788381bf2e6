//! HTTP query surface: routing, parameter handling, response mapping.

pub mod app;
pub mod middleware;
