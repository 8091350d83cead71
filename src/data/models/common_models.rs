use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

/// Bare acknowledgement, e.g. `{"status": "deleted"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
