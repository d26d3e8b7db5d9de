//! Success envelope.
//!
//! Every JSON success body except `POST /upload-images` is
//! `{ "data": ... }`; errors use `{ "error", "code" }` from [`crate::error`].

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
