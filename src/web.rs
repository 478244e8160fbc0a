use std::sync::Arc;

use alexa::{Alexa, RequestEnvelope, ResponseEnvelope, Skill};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{MethodRouter, post};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

struct SkillState<S: Skill> {
    alexa: Arc<Alexa>,
    skill: Arc<S>,
    context: Arc<S::Context>,
}

impl<S: Skill> Clone for SkillState<S> {
    fn clone(&self) -> Self {
        Self {
            alexa: self.alexa.clone(),
            skill: self.skill.clone(),
            context: self.context.clone(),
        }
    }
}

/// Route that hands every posted envelope to `skill`.
pub fn skill_route<S>(alexa: Arc<Alexa>, skill: S, context: S::Context) -> MethodRouter
where
    S: Skill + Send + Sync + 'static,
    S::Context: Send + Sync + 'static,
{
    post(fulfillment::<S>).with_state(SkillState {
        alexa,
        skill: Arc::new(skill),
        context: Arc::new(context),
    })
}

async fn fulfillment<S>(
    State(state): State<SkillState<S>>,
    Json(payload): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>, ApiError>
where
    S: Skill + Send + Sync + 'static,
    S::Context: Send + Sync + 'static,
{
    let result = state
        .alexa
        .handle_request(state.skill.as_ref(), payload, state.context.as_ref())?;

    debug!("{result:#?}");

    Ok(Json(result))
}

#[derive(Debug, Error)]
#[error("{source}")]
pub struct ApiError {
    status_code: StatusCode,
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl ApiError {
    pub fn new(status_code: StatusCode, source: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self {
            status_code,
            source,
        }
    }
}

impl From<alexa::errors::FulfillmentError> for ApiError {
    fn from(err: alexa::errors::FulfillmentError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.into())
    }
}

impl From<ApiError> for ApiErrorJson {
    fn from(value: ApiError) -> Self {
        let error = ApiErrorJsonError {
            code: value.status_code.as_u16(),
            status: value.status_code.to_string(),
            reason: value.source.to_string(),
        };

        Self { error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, axum::Json(ApiErrorJson::from(self))).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiErrorJsonError {
    code: u16,
    status: String,
    reason: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorJson {
    error: ApiErrorJsonError,
}
