//! HTTP API: configuration, application context, auth middleware, routing.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
