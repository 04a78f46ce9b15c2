//! HTTP surface over the fan-out task core.
//!
//! Every endpoint under `/tasks` exercises one concurrency pattern of
//! the core library, from a single inline task up to the
//! sequential-vs-concurrent benchmark.

pub mod config;
pub mod error;
pub mod routes;
pub mod serve;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use serve::{ServeHandle, serve};
pub use state::AppState;
