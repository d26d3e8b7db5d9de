//! Credentials: password hashing in [`password`], access tokens in [`jwt`].

pub mod jwt;
pub mod password;
