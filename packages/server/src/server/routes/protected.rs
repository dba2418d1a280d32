//! Demo handlers that sit behind access gates.
//!
//! They never inspect the session themselves; reaching them means the gate
//! already allowed the request.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

fn message(message: &'static str) -> Json<MessageResponse> {
    Json(MessageResponse { message })
}

pub async fn me_handler() -> Json<MessageResponse> {
    message("You are signed in.")
}

pub async fn account_handler() -> Json<MessageResponse> {
    message("Your account is verified.")
}

pub async fn admin_handler() -> Json<MessageResponse> {
    message("Welcome to the admin area.")
}

pub async fn drafts_handler() -> Json<MessageResponse> {
    message("Here are the article drafts.")
}
