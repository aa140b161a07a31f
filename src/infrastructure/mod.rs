//! Infrastructure layer: REST client, terminal prompt and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod connection;
pub mod di;
pub mod error;
pub mod rest;
pub mod traits;

pub use connection::HostConnection;
pub use error::{ApiError, ApiResult};
pub use rest::RestClient;
