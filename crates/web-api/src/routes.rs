//! Privileged mutation endpoints.
//!
//! Every request body carries a `requesterId`. Handlers resolve that id
//! against the user store and pass the resulting session into the gated
//! domain services, so client-declared roles are never trusted.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use ferrum_domain as domain;
use ferrum_storage::Store;

use domain::{Service, SessionService, UserService, WorkoutService};

use crate::error::ApiError;

pub type ApiService = Arc<Service<Store>>;

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    pub requester_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserBody {
    pub requester_id: Uuid,
    pub user_id: Uuid,
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeleteWorkoutBody {
    pub requester_id: Uuid,
    pub workout_id: Uuid,
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateWorkoutBody {
    pub requester_id: Uuid,
    pub workout_id: Uuid,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub carry_weights: bool,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<domain::User> for UserResponse {
    fn from(value: domain::User) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            email: value.email.to_string(),
            role: value.role.to_string(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub occurrences: u32,
}

impl From<domain::Workout> for WorkoutResponse {
    fn from(value: domain::Workout) -> Self {
        Self {
            id: *value.id,
            user_id: *value.user_id,
            name: value.name.to_string(),
            date: value.date,
            occurrences: value.occurrences.into(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct DeletedResponse {
    pub deleted: Uuid,
}

pub struct ApiRoutes;

impl ApiRoutes {
    pub fn router(service: ApiService) -> Router {
        Router::new()
            .route("/api/health", get(Self::handle_health))
            .route("/api/users", post(Self::handle_create_user))
            .route("/api/users/delete", post(Self::handle_delete_user))
            .route("/api/workouts/delete", post(Self::handle_delete_workout))
            .route(
                "/api/workouts/duplicate",
                post(Self::handle_duplicate_workout),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(service)
    }

    async fn handle_health() -> Json<serde_json::Value> {
        Json(serde_json::json!({"status": "ok"}))
    }

    async fn handle_create_user(
        State(service): State<ApiService>,
        Json(body): Json<CreateUserBody>,
    ) -> Result<Response, ApiError> {
        let session = service.request_session(body.requester_id.into()).await?;
        let user = service
            .create_user(
                &session,
                domain::Name::new(&body.name)?,
                domain::Email::new(&body.email)?,
                domain::Role::from(body.role.as_str()),
            )
            .await?;
        Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
    }

    async fn handle_delete_user(
        State(service): State<ApiService>,
        Json(body): Json<DeleteUserBody>,
    ) -> Result<Response, ApiError> {
        let session = service.request_session(body.requester_id.into()).await?;
        let id = service.delete_user(&session, body.user_id.into()).await?;
        Ok((StatusCode::OK, Json(DeletedResponse { deleted: *id })).into_response())
    }

    async fn handle_delete_workout(
        State(service): State<ApiService>,
        Json(body): Json<DeleteWorkoutBody>,
    ) -> Result<Response, ApiError> {
        let session = service.request_session(body.requester_id.into()).await?;
        let id = service
            .delete_workout(&session, body.workout_id.into())
            .await?;
        Ok((StatusCode::OK, Json(DeletedResponse { deleted: *id })).into_response())
    }

    async fn handle_duplicate_workout(
        State(service): State<ApiService>,
        Json(body): Json<DuplicateWorkoutBody>,
    ) -> Result<Response, ApiError> {
        let session = service.request_session(body.requester_id.into()).await?;
        let workout = service
            .duplicate_workout(
                &session,
                body.workout_id.into(),
                body.target_date,
                domain::DuplicateOptions {
                    carry_weights: body.carry_weights,
                },
            )
            .await?;
        Ok((StatusCode::CREATED, Json(WorkoutResponse::from(workout))).into_response())
    }
}
