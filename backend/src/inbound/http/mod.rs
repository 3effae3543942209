//! HTTP inbound adapter exposing the user resource.

pub mod envelope;
pub mod error;
pub mod health;
pub mod routes;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;
