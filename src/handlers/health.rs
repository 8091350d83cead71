use axum::extract::{Json, State};
use diesel::prelude::*;

use crate::AppState;
use crate::data::models::HealthResponse;

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.pool.get() {
        Ok(mut conn) => match diesel::sql_query("SELECT 1").execute(&mut conn) {
            Ok(_) => "ok",
            Err(e) => {
                log::error!("Health check query failed: {}", e);
                "error"
            }
        },
        Err(e) => {
            log::error!("Health check could not get a connection: {}", e);
            "error"
        }
    };

    Json(HealthResponse {
        status: "ok".into(),
        database: database.into(),
    })
}
