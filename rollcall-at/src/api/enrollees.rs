//! Administrative enrollee endpoints: listing/search and updates

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rollcall_common::db::models::Enrollee;
use rollcall_common::{rut, Error};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::ApiError;
use crate::db::enrollees::{self, UpdateEnrollee};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Identity fragment to search for; normalized before matching
    pub identity: Option<String>,
}

/// GET /api/enrollees
///
/// Full enrollee list, or a substring search over normalized
/// identities when `?identity=` is given.
pub async fn list_enrollees(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Enrollee>>, ApiError> {
    let fragment = query.identity.as_deref().map(rut::normalize);
    let enrollees = enrollees::list(&state.db, fragment.as_deref()).await?;
    Ok(Json(enrollees))
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub message: String,
}

/// PUT /api/enrollees/:guid
///
/// Partial update from the administrative view. Only whitelisted
/// fields are accepted; see [`UpdateEnrollee`] for the per-field
/// rules. 404 when the guid matches nobody.
pub async fn update_enrollee(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(update): Json<UpdateEnrollee>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let updated = enrollees::update(&state.db, &guid, &update).await?;
    if !updated {
        return Err(Error::NotFound(format!("No enrollee with guid {}", guid)).into());
    }

    info!("Updated enrollee {}", guid);
    Ok(Json(UpdateResponse {
        message: "Enrollee updated".to_string(),
    }))
}
