//! Coaching endpoint.

use axum::{body::Bytes, Json};

use crate::coach::{advise, CoachRequest, CoachResponse};

/// Answer a coaching request.
///
/// The raw body is taken as bytes so that a missing or malformed payload is
/// turned into defaults instead of a rejection.
pub async fn coach(body: Bytes) -> Json<CoachResponse> {
    let request = CoachRequest::from_body(&body);
    tracing::debug!(stage = %request.stage, "Coaching request");

    Json(advise(request))
}
