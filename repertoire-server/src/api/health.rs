//! Health check

use axum::Json;
use serde_json::{Value, json};

use shared::util::now_millis;

use crate::utils::{AppResponse, ok};

pub async fn health_check() -> Json<AppResponse<Value>> {
    ok(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": now_millis(),
    }))
}
