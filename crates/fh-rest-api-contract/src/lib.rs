//! FutureHouse platform REST API contract types and validation
//!
//! This crate defines the schema types shared between the REST client,
//! the mock client, and the CLI: task requests and their runtime options,
//! status and result payloads, and the problem document the service
//! returns on errors.

pub mod error;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;
