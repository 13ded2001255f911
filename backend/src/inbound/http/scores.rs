//! Score HTTP handlers.
//!
//! ```text
//! POST   /api/v1/scores
//! PUT    /api/v1/scores/{id}
//! DELETE /api/v1/scores/{id}
//! ```
//!
//! The handlers only translate between HTTP and the `ScoreCommand` port; the
//! authorization and validation order is decided by the domain service.

use actix_web::{HttpResponse, delete, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Score, ScoreId, ScorePayload, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload for creating or partially updating a score.
///
/// All fields are optional at the wire level. Create requires all three and
/// reports the missing ones; update applies only the fields present.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    /// Score value. No range constraint.
    pub value: Option<i64>,
    /// Identifier of the owning user.
    pub user_id: Option<i64>,
    /// Moment the score was achieved. RFC 3339, `YYYY-MM-DD HH:MM:SS`, or
    /// `YYYY-MM-DD`.
    pub recorded_at: Option<String>,
}

impl From<ScoreRequest> for ScorePayload {
    fn from(request: ScoreRequest) -> Self {
        Self {
            value: request.value,
            user_id: request.user_id.map(UserId::new),
            recorded_at: request.recorded_at,
        }
    }
}

/// Response payload for a persisted score.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub id: i64,
    pub value: i64,
    pub user_id: i64,
    /// RFC 3339 timestamp.
    pub recorded_at: String,
}

impl From<Score> for ScoreResponse {
    fn from(score: Score) -> Self {
        Self {
            id: score.id().get(),
            value: score.value(),
            user_id: score.user_id().get(),
            recorded_at: score.recorded_at().to_rfc3339(),
        }
    }
}

/// Create a score. Admin-only.
#[utoipa::path(
    post,
    path = "/api/v1/scores",
    request_body = ScoreRequest,
    responses(
        (status = 201, description = "Score created", body = ScoreResponse,
            headers(("Location" = String, description = "URL of the new score"))),
        (status = 400, description = "Unknown owner or unparsable timestamp", body = Error),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error),
        (status = 422, description = "Required fields missing", body = Error)
    ),
    tags = ["scores"],
    operation_id = "createScore"
)]
#[post("/scores")]
pub async fn create_score(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<ScoreRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    let score = state
        .scores
        .create_score(&caller, payload.into_inner().into())
        .await?;
    let location = format!("/api/v1/scores/{}", score.id());
    Ok(HttpResponse::Created()
        .insert_header(("Location", location))
        .json(ScoreResponse::from(score)))
}

/// Partially update a score. Owner or admin.
#[utoipa::path(
    put,
    path = "/api/v1/scores/{id}",
    request_body = ScoreRequest,
    params(("id" = i64, Path, description = "Score identifier")),
    responses(
        (status = 200, description = "Score updated", body = ScoreResponse),
        (status = 400, description = "Unknown owner or unparsable timestamp", body = Error),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Caller is neither owner nor admin", body = Error),
        (status = 404, description = "No score with this id", body = Error)
    ),
    tags = ["scores"],
    operation_id = "updateScore"
)]
#[put("/scores/{id}")]
pub async fn update_score(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<ScoreRequest>,
) -> ApiResult<web::Json<ScoreResponse>> {
    let caller = session.caller()?;
    let id = ScoreId::new(path.into_inner());
    let score = state
        .scores
        .update_score(&caller, id, payload.into_inner().into())
        .await?;
    Ok(web::Json(ScoreResponse::from(score)))
}

/// Delete a score. Admin-only, regardless of ownership.
#[utoipa::path(
    delete,
    path = "/api/v1/scores/{id}",
    params(("id" = i64, Path, description = "Score identifier")),
    responses(
        (status = 204, description = "Score deleted"),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error),
        (status = 404, description = "No score with this id", body = Error)
    ),
    tags = ["scores"],
    operation_id = "deleteScore"
)]
#[delete("/scores/{id}")]
pub async fn delete_score(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    let id = ScoreId::new(path.into_inner());
    state.scores.delete_score(&caller, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "scores_tests.rs"]
mod scores_tests;
