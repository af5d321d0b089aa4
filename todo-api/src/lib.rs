//! Todo API service
//!
//! HTTP bootstrap with a permissive CORS policy and an on-demand MySQL
//! connection provider.

pub mod app;
pub mod config;
pub mod error;

pub use crate::app::{build_router, create_cors, AppContext};
pub use crate::config::ApiConfig;
pub use crate::error::ApiError;
