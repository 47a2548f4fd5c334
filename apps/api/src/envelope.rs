//! Success envelopes for the REST surface.
//!
//! Every endpoint responds inside `{"success": …}`; errors produce the
//! matching `{"success": false, "message": …}` shape via `AppError`.

use axum::Json;
use serde::Serialize;

/// `{"success": true, "data": …}` — the common read/mutation response.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> Data<T> {
    pub fn json(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// `{"success": true, "message": …}` — mutations that confirm without a payload.
#[derive(Debug, Serialize)]
pub struct Message {
    pub success: bool,
    pub message: String,
}

impl Message {
    pub fn json(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}
