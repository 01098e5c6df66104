//! Shared library surface for the route planning server and its tools.

pub mod api;
pub mod config;
pub mod state;
