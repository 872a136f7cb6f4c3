pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod portfolio;
pub mod storage;
pub mod table;

pub use client::Backend;
pub use config::BackendConfig;
pub use error::{BackendError, Result};
pub use portfolio::Portfolio;
pub use table::{Filter, Order};
