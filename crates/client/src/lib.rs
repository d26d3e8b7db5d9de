//! Service layer shared by the CityVetCare mobile and admin clients.
//!
//! [`ApiClient`] wraps every REST operation; [`forms`] carries the
//! submission gates checked before a request leaves the device; [`filter`]
//! applies list filters to already fetched pages.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod forms;
pub mod models;

pub use client::ApiClient;
pub use config::{ClientConfig, Environment};
pub use error::ClientError;
