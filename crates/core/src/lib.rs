//! Domain types and rules for the CityVetCare platform.
//!
//! Everything here is free of I/O so that the database layer, the HTTP
//! server and the client service layer can share one vocabulary.

pub mod announcement;
pub mod decision;
pub mod error;
pub mod geo;
pub mod incident;
pub mod reading_material;
pub mod roles;
pub mod search;
pub mod status;
pub mod types;
pub mod upload;
pub mod vaccination;
pub mod validation;
