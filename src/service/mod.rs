//! Access to the target service's administrative API.
//!
//! The procedure only depends on the [`AdminApi`] trait. [`MilvusRestClient`]
//! is the production implementation; tests substitute scripted doubles.

pub mod client;
pub mod error;
pub mod rest;

pub use client::{AdminApi, ConnectParams, SessionHandle};
pub use error::{Result, ServiceError};
pub use rest::MilvusRestClient;
