//! Infrastructure layer: in-memory collaborators, seeding and configuration.

pub mod cart_store;
pub mod config;
pub mod seed;
pub mod session_store;

pub use cart_store::{CartLine, InMemoryCartStore, SessionCart};
pub use config::AppConfig;
pub use session_store::{InMemorySessionStore, SessionStore};
