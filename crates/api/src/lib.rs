//! HTTP API: quick order widget rendering and batch add-to-cart.

pub mod app;
pub mod context;
pub mod middleware;
pub mod widget;
