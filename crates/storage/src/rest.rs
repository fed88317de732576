//! REST storage backed by a PostgREST compatible server.
//!
//! Tables are exposed under `rest/v1/<table>`, the identity of the current
//! token under `auth/v1` and video blobs under `storage/v1/object`. Writes
//! ask for the changed rows with `Prefer: return=representation`, an empty
//! representation means no row matched the filters.

use std::time::Duration;

use chrono::NaiveDate;
use ferrum_domain as domain;
use log::debug;
use reqwest::Method;
use serde_json::{Map, json};
use strum::AsRefStr;
use uuid::Uuid;

use domain::{NotFoundError, StorageError};

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Body>,
    pub returning: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(serde_json::Value),
    Bytes { data: Vec<u8>, content_type: String },
}

impl Request {
    fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: vec![],
            body: None,
            returning: false,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn patch(path: &str) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: String) -> Self {
        self.query.push((key.to_string(), value));
        self
    }

    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    #[must_use]
    pub fn bytes(mut self, data: Vec<u8>, content_type: &str) -> Self {
        self.body = Some(Body::Bytes {
            data,
            content_type: content_type.to_string(),
        });
        self
    }

    #[must_use]
    pub fn returning(mut self) -> Self {
        self.returning = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, StorageError>;
    fn public_url(&self, path: &str) -> String;
}

pub struct HttpSender {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSender {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StorageError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "apikey",
            reqwest::header::HeaderValue::from_str(api_key)
                .map_err(|err| StorageError::Other(err.into()))?,
        );
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|err| StorageError::Other(err.into()))?,
        );
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .default_headers(headers)
            .build()
            .map_err(|err| StorageError::Other(err.into()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl SendRequest for HttpSender {
    async fn send_request(&self, request: Request) -> Result<Response, StorageError> {
        debug!("{} {}", request.method, request.path);

        let url = format!("{}/{}", self.base_url, request.path);
        let mut builder = self
            .client
            .request(request.method, url)
            .query(&request.query);
        if request.returning {
            builder = builder.header("Prefer", "return=representation");
        }
        builder = match request.body {
            Some(Body::Json(body)) => builder.json(&body),
            Some(Body::Bytes { data, content_type }) => builder
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(data),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|_| StorageError::NoConnection)?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|_| StorageError::NoConnection)?
            .to_vec();
        Ok(Response { status, body })
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[derive(AsRefStr, Clone, Copy)]
enum Table {
    #[strum(serialize = "users")]
    Users,
    #[strum(serialize = "exercises")]
    Exercises,
    #[strum(serialize = "templates")]
    Templates,
    #[strum(serialize = "workouts")]
    Workouts,
    #[strum(serialize = "log_entries")]
    LogEntries,
}

impl Table {
    fn path(self) -> String {
        format!("rest/v1/{}", self.as_ref())
    }
}

const VIDEO_BUCKET: &str = "set-videos";

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

fn gt(value: impl std::fmt::Display) -> String {
    format!("gt.{value}")
}

pub struct Rest<S: SendRequest> {
    pub sender: S,
}

impl Rest<HttpSender> {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StorageError> {
        Ok(Self {
            sender: HttpSender::new(base_url, api_key)?,
        })
    }
}

impl<S: SendRequest> Rest<S> {
    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<T, StorageError> {
        let response = self.sender.send_request(request).await?;
        if (200..300).contains(&response.status) {
            serde_json::from_slice(&response.body).map_err(|err| StorageError::Other(err.into()))
        } else {
            Err(rejection(&response))
        }
    }

    async fn fetch_no_content(&self, request: Request) -> Result<(), StorageError> {
        let response = self.sender.send_request(request).await?;
        if (200..300).contains(&response.status) {
            Ok(())
        } else {
            Err(rejection(&response))
        }
    }

    /// Fetches the representation of a single-row read or write. An empty
    /// representation means no row matched the filters.
    async fn fetch_row<T: serde::de::DeserializeOwned>(
        &self,
        request: Request,
        not_found: NotFoundError,
    ) -> Result<T, domain::ReadError> {
        let mut rows: Vec<T> = self.fetch(request).await?;
        if rows.is_empty() {
            return Err(domain::ReadError::NotFound(not_found));
        }
        Ok(rows.swap_remove(0))
    }
}

fn rejection(response: &Response) -> StorageError {
    StorageError::Rejected(format!(
        "{}: {}",
        response.status,
        String::from_utf8_lossy(&response.body).trim()
    ))
}

impl<S: SendRequest> domain::SessionRepository for Rest<S> {
    async fn request_session(
        &self,
        user_id: domain::UserID,
    ) -> Result<domain::Session, domain::ReadError> {
        let row: User = self
            .fetch_row(
                Request::get(&Table::Users.path()).query("id", eq(user_id)),
                NotFoundError::User(user_id),
            )
            .await?;
        let user = domain::User::try_from(row)?;
        Ok(domain::Session::from(&user))
    }

    async fn initialize_session(&self) -> Result<domain::Session, domain::ReadError> {
        let response = self
            .sender
            .send_request(Request::get("auth/v1/user"))
            .await?;
        if response.status == 401 || response.status == 403 {
            return Err(StorageError::NoSession.into());
        }
        if !(200..300).contains(&response.status) {
            return Err(rejection(&response).into());
        }
        let identity: Identity = serde_json::from_slice(&response.body)
            .map_err(|err| StorageError::Other(err.into()))?;
        self.request_session(identity.id.into()).await
    }

    async fn delete_session(&self) -> Result<(), domain::DeleteError> {
        Ok(self
            .fetch_no_content(Request::post("auth/v1/logout"))
            .await?)
    }
}

impl<S: SendRequest> domain::UserRepository for Rest<S> {
    async fn read_users(&self) -> Result<Vec<domain::User>, domain::ReadError> {
        let rows: Vec<User> = self.fetch(Request::get(&Table::Users.path())).await?;
        rows.into_iter()
            .map(|row| Ok(domain::User::try_from(row)?))
            .collect()
    }

    async fn create_user(&self, user: domain::User) -> Result<domain::User, domain::CreateError> {
        let row: User = self
            .fetch_row(
                Request::post(&Table::Users.path())
                    .json(json!(User::from(&user)))
                    .returning(),
                NotFoundError::User(user.id),
            )
            .await?;
        Ok(domain::User::try_from(row)?)
    }

    async fn replace_user(&self, user: domain::User) -> Result<domain::User, domain::UpdateError> {
        let row: User = self
            .fetch_row(
                Request::patch(&Table::Users.path())
                    .query("id", eq(user.id))
                    .json(json!(User::from(&user)))
                    .returning(),
                NotFoundError::User(user.id),
            )
            .await?;
        Ok(domain::User::try_from(row)?)
    }

    async fn delete_user(&self, id: domain::UserID) -> Result<domain::UserID, domain::DeleteError> {
        self.fetch_row::<serde_json::Value>(
            Request::delete(&Table::Users.path())
                .query("id", eq(id))
                .returning(),
            NotFoundError::User(id),
        )
        .await?;
        Ok(id)
    }
}

impl<S: SendRequest> domain::ExerciseRepository for Rest<S> {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let rows: Vec<Exercise> = self.fetch(Request::get(&Table::Exercises.path())).await?;
        rows.into_iter()
            .map(|row| Ok(domain::Exercise::try_from(row)?))
            .collect()
    }

    async fn create_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let row: Exercise = self
            .fetch_row(
                Request::post(&Table::Exercises.path())
                    .json(json!(Exercise::from(&exercise)))
                    .returning(),
                NotFoundError::Exercise(exercise.id),
            )
            .await?;
        Ok(domain::Exercise::try_from(row)?)
    }

    async fn replace_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let row: Exercise = self
            .fetch_row(
                Request::patch(&Table::Exercises.path())
                    .query("id", eq(exercise.id))
                    .json(json!(Exercise::from(&exercise)))
                    .returning(),
                NotFoundError::Exercise(exercise.id),
            )
            .await?;
        Ok(domain::Exercise::try_from(row)?)
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        self.fetch_row::<serde_json::Value>(
            Request::delete(&Table::Exercises.path())
                .query("id", eq(id))
                .returning(),
            NotFoundError::Exercise(id),
        )
        .await?;
        Ok(id)
    }
}

impl<S: SendRequest> domain::TemplateRepository for Rest<S> {
    async fn read_templates(&self) -> Result<Vec<domain::Template>, domain::ReadError> {
        let rows: Vec<Template> = self.fetch(Request::get(&Table::Templates.path())).await?;
        rows.into_iter()
            .map(|row| Ok(domain::Template::try_from(row)?))
            .collect()
    }

    async fn read_template(
        &self,
        id: domain::TemplateID,
    ) -> Result<domain::Template, domain::ReadError> {
        let row: Template = self
            .fetch_row(
                Request::get(&Table::Templates.path()).query("id", eq(id)),
                NotFoundError::Template(id),
            )
            .await?;
        Ok(domain::Template::try_from(row)?)
    }

    async fn create_template(
        &self,
        template: domain::Template,
    ) -> Result<domain::Template, domain::CreateError> {
        let row: Template = self
            .fetch_row(
                Request::post(&Table::Templates.path())
                    .json(json!(Template::from(&template)))
                    .returning(),
                NotFoundError::Template(template.id),
            )
            .await?;
        Ok(domain::Template::try_from(row)?)
    }

    async fn modify_template(
        &self,
        id: domain::TemplateID,
        name: Option<domain::Name>,
        description: Option<String>,
        items: Option<Vec<domain::BlueprintItem>>,
    ) -> Result<domain::Template, domain::UpdateError> {
        let mut content = Map::new();
        if let Some(name) = name {
            content.insert("name".into(), json!(name.to_string()));
        }
        if let Some(description) = description {
            content.insert("description".into(), json!(description));
        }
        if let Some(items) = items {
            content.insert(
                "items".into(),
                json!(items.iter().map(TemplateItem::from).collect::<Vec<_>>()),
            );
        }
        let row: Template = self
            .fetch_row(
                Request::patch(&Table::Templates.path())
                    .query("id", eq(id))
                    .json(serde_json::Value::Object(content))
                    .returning(),
                NotFoundError::Template(id),
            )
            .await?;
        Ok(domain::Template::try_from(row)?)
    }

    async fn delete_template(
        &self,
        id: domain::TemplateID,
    ) -> Result<domain::TemplateID, domain::DeleteError> {
        self.fetch_row::<serde_json::Value>(
            Request::delete(&Table::Templates.path())
                .query("id", eq(id))
                .returning(),
            NotFoundError::Template(id),
        )
        .await?;
        Ok(id)
    }
}

impl<S: SendRequest> domain::WorkoutRepository for Rest<S> {
    async fn read_workouts(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        let rows: Vec<Workout> = self
            .fetch(Request::get(&Table::Workouts.path()).query("user_id", eq(user_id)))
            .await?;
        rows.into_iter()
            .map(|row| Ok(domain::Workout::try_from(row)?))
            .collect()
    }

    async fn read_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::Workout, domain::ReadError> {
        let row: Workout = self
            .fetch_row(
                Request::get(&Table::Workouts.path()).query("id", eq(id)),
                NotFoundError::Workout(id),
            )
            .await?;
        Ok(domain::Workout::try_from(row)?)
    }

    async fn create_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::CreateError> {
        let row: Workout = self
            .fetch_row(
                Request::post(&Table::Workouts.path())
                    .json(json!(Workout::from(&workout)))
                    .returning(),
                NotFoundError::Workout(workout.id),
            )
            .await?;
        Ok(domain::Workout::try_from(row)?)
    }

    async fn modify_workout(
        &self,
        id: domain::WorkoutID,
        name: Option<domain::Name>,
        date: Option<NaiveDate>,
        occurrences: Option<domain::Occurrences>,
    ) -> Result<domain::Workout, domain::UpdateError> {
        let mut content = Map::new();
        if let Some(name) = name {
            content.insert("name".into(), json!(name.to_string()));
        }
        if let Some(date) = date {
            content.insert("date".into(), json!(date));
        }
        if let Some(occurrences) = occurrences {
            content.insert("occurrences".into(), json!(u32::from(occurrences)));
        }
        let row: Workout = self
            .fetch_row(
                Request::patch(&Table::Workouts.path())
                    .query("id", eq(id))
                    .json(serde_json::Value::Object(content))
                    .returning(),
                NotFoundError::Workout(id),
            )
            .await?;
        Ok(domain::Workout::try_from(row)?)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.fetch_row::<serde_json::Value>(
            Request::delete(&Table::Workouts.path())
                .query("id", eq(id))
                .returning(),
            NotFoundError::Workout(id),
        )
        .await?;
        Ok(id)
    }
}

impl<S: SendRequest> domain::LogEntryRepository for Rest<S> {
    async fn read_log_entries(
        &self,
        workout_id: domain::WorkoutID,
    ) -> Result<Vec<domain::LogEntry>, domain::ReadError> {
        let rows: Vec<LogEntry> = self
            .fetch(Request::get(&Table::LogEntries.path()).query("workout_id", eq(workout_id)))
            .await?;
        rows.into_iter()
            .map(|row| Ok(domain::LogEntry::try_from(row)?))
            .collect()
    }

    async fn count_exercise_references(
        &self,
        exercise_id: domain::ExerciseID,
    ) -> Result<usize, domain::ReadError> {
        let rows: Vec<serde_json::Value> = self
            .fetch(
                Request::get(&Table::LogEntries.path())
                    .query("exercise_id", eq(exercise_id))
                    .query("select", "workout_id".to_string()),
            )
            .await?;
        Ok(rows.len())
    }

    async fn create_log_entries(
        &self,
        entries: Vec<domain::LogEntry>,
    ) -> Result<(), domain::CreateError> {
        Ok(self
            .fetch_no_content(
                Request::post(&Table::LogEntries.path())
                    .json(json!(entries.iter().map(LogEntry::from).collect::<Vec<_>>())),
            )
            .await?)
    }

    async fn update_log_targets(
        &self,
        workout_id: domain::WorkoutID,
        exercise_id: domain::ExerciseID,
        targets: domain::LogTargets,
    ) -> Result<(), domain::UpdateError> {
        Ok(self
            .fetch_no_content(
                Request::patch(&Table::LogEntries.path())
                    .query("workout_id", eq(workout_id))
                    .query("exercise_id", eq(exercise_id))
                    .json(json!({
                        "exercise_order": targets.order.to_string(),
                        "target_reps": targets.target_reps.to_string(),
                        "tempo": targets.tempo.to_string(),
                        "rest_seconds": u32::from(targets.rest),
                        "notes": targets.notes,
                    })),
            )
            .await?)
    }

    async fn update_log_execution(
        &self,
        key: domain::LogKey,
        weight: Option<domain::Weight>,
        reps: Option<domain::Reps>,
        completed: bool,
    ) -> Result<domain::LogEntry, domain::UpdateError> {
        let row: LogEntry = self
            .fetch_row(
                log_entry_request(Request::patch(&Table::LogEntries.path()), key)
                    .json(json!({
                        "weight": weight.map(f32::from),
                        "reps": reps.map(u32::from),
                        "completed": completed,
                    }))
                    .returning(),
                NotFoundError::LogEntry(key),
            )
            .await?;
        Ok(domain::LogEntry::try_from(row)?)
    }

    async fn update_log_video(
        &self,
        key: domain::LogKey,
        video_url: Option<String>,
    ) -> Result<domain::LogEntry, domain::UpdateError> {
        let row: LogEntry = self
            .fetch_row(
                log_entry_request(Request::patch(&Table::LogEntries.path()), key)
                    .json(json!({ "video_url": video_url }))
                    .returning(),
                NotFoundError::LogEntry(key),
            )
            .await?;
        Ok(domain::LogEntry::try_from(row)?)
    }

    async fn update_log_comment(
        &self,
        key: domain::LogKey,
        comment: Option<String>,
    ) -> Result<domain::LogEntry, domain::UpdateError> {
        let row: LogEntry = self
            .fetch_row(
                log_entry_request(Request::patch(&Table::LogEntries.path()), key)
                    .json(json!({ "coach_comment": comment }))
                    .returning(),
                NotFoundError::LogEntry(key),
            )
            .await?;
        Ok(domain::LogEntry::try_from(row)?)
    }

    async fn delete_sets_above(
        &self,
        workout_id: domain::WorkoutID,
        exercise_id: domain::ExerciseID,
        max_set: domain::SetNumber,
    ) -> Result<(), domain::DeleteError> {
        Ok(self
            .fetch_no_content(
                Request::delete(&Table::LogEntries.path())
                    .query("workout_id", eq(workout_id))
                    .query("exercise_id", eq(exercise_id))
                    .query("set_number", gt(max_set)),
            )
            .await?)
    }

    async fn delete_exercise_log(
        &self,
        workout_id: domain::WorkoutID,
        exercise_id: domain::ExerciseID,
    ) -> Result<(), domain::DeleteError> {
        Ok(self
            .fetch_no_content(
                Request::delete(&Table::LogEntries.path())
                    .query("workout_id", eq(workout_id))
                    .query("exercise_id", eq(exercise_id)),
            )
            .await?)
    }

    async fn delete_days_above(
        &self,
        workout_id: domain::WorkoutID,
        max_day: domain::DayNumber,
    ) -> Result<(), domain::DeleteError> {
        Ok(self
            .fetch_no_content(
                Request::delete(&Table::LogEntries.path())
                    .query("workout_id", eq(workout_id))
                    .query("day_number", gt(max_day)),
            )
            .await?)
    }

    async fn delete_workout_log(
        &self,
        workout_id: domain::WorkoutID,
    ) -> Result<(), domain::DeleteError> {
        Ok(self
            .fetch_no_content(
                Request::delete(&Table::LogEntries.path()).query("workout_id", eq(workout_id)),
            )
            .await?)
    }
}

impl<S: SendRequest> domain::FeedbackRepository for Rest<S> {
    async fn update_feedback(
        &self,
        workout_id: domain::WorkoutID,
        feedback: Option<domain::CoachFeedback>,
    ) -> Result<(), domain::UpdateError> {
        let (comment, unread) = match feedback {
            Some(feedback) => (Some(feedback.comment), feedback.unread),
            None => (None, false),
        };
        self.fetch_row::<serde_json::Value>(
            Request::patch(&Table::Workouts.path())
                .query("id", eq(workout_id))
                .json(json!({
                    "coach_comment": comment,
                    "feedback_unread": unread,
                }))
                .returning(),
            NotFoundError::Workout(workout_id),
        )
        .await?;
        Ok(())
    }
}

impl<S: SendRequest> domain::MediaRepository for Rest<S> {
    async fn upload_video(
        &self,
        name: &str,
        video: Vec<u8>,
        content_type: &str,
    ) -> Result<String, domain::CreateError> {
        self.fetch_no_content(
            Request::post(&format!("storage/v1/object/{VIDEO_BUCKET}/{name}"))
                .bytes(video, content_type),
        )
        .await?;
        Ok(self
            .sender
            .public_url(&format!("storage/v1/object/public/{VIDEO_BUCKET}/{name}")))
    }
}

fn log_entry_request(request: Request, key: domain::LogKey) -> Request {
    request
        .query("workout_id", eq(key.workout_id))
        .query("exercise_id", eq(key.exercise_id))
        .query("day_number", eq(key.day))
        .query("set_number", eq(key.set))
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
struct Identity {
    pub id: Uuid,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<domain::User> for User {
    fn from(value: domain::User) -> Self {
        Self::from(&value)
    }
}

impl From<&domain::User> for User {
    fn from(value: &domain::User) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            email: value.email.to_string(),
            role: value.role.to_string(),
        }
    }
}

impl TryFrom<User> for domain::User {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(value: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            email: domain::Email::new(&value.email)?,
            role: domain::Role::from(value.role.as_str()),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub body_part: String,
    pub video_url: Option<String>,
    pub notes: String,
}

impl From<domain::Exercise> for Exercise {
    fn from(value: domain::Exercise) -> Self {
        Self::from(&value)
    }
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            body_part: value.body_part.to_string(),
            video_url: value.video_url.clone(),
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            body_part: domain::BodyPart::try_from(value.body_part.as_str())?,
            video_url: value.video_url,
            notes: value.notes,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub items: Vec<TemplateItem>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct TemplateItem {
    pub exercise_id: Uuid,
    pub exercise_order: String,
    pub sets: u32,
    pub target_reps: String,
    pub tempo: String,
    pub rest_seconds: u32,
    pub notes: String,
}

impl From<domain::Template> for Template {
    fn from(value: domain::Template) -> Self {
        Self::from(&value)
    }
}

impl From<&domain::Template> for Template {
    fn from(value: &domain::Template) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            description: value.description.clone(),
            items: value.items.iter().map(TemplateItem::from).collect(),
        }
    }
}

impl TryFrom<Template> for domain::Template {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(value: Template) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            items: value
                .items
                .into_iter()
                .map(domain::BlueprintItem::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl From<&domain::BlueprintItem> for TemplateItem {
    fn from(value: &domain::BlueprintItem) -> Self {
        Self {
            exercise_id: *value.exercise_id,
            exercise_order: value.order.to_string(),
            sets: value.sets.into(),
            target_reps: value.target_reps.to_string(),
            tempo: value.tempo.to_string(),
            rest_seconds: value.rest.into(),
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<TemplateItem> for domain::BlueprintItem {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(value: TemplateItem) -> Result<Self, Self::Error> {
        Ok(Self {
            exercise_id: value.exercise_id.into(),
            order: domain::OrderToken::new(&value.exercise_order)?,
            sets: domain::Sets::new(value.sets)?,
            target_reps: domain::TargetReps::new(&value.target_reps)?,
            tempo: domain::Tempo::new(&value.tempo)?,
            rest: domain::Rest::new(value.rest_seconds)?,
            notes: value.notes,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub occurrences: u32,
    pub coach_comment: Option<String>,
    pub feedback_unread: bool,
}

impl From<domain::Workout> for Workout {
    fn from(value: domain::Workout) -> Self {
        Self::from(&value)
    }
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            user_id: *value.user_id,
            name: value.name.to_string(),
            date: value.date,
            occurrences: value.occurrences.into(),
            coach_comment: value.feedback.as_ref().map(|f| f.comment.clone()),
            feedback_unread: value.feedback.as_ref().is_some_and(|f| f.unread),
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            user_id: value.user_id.into(),
            name: domain::Name::new(&value.name)?,
            date: value.date,
            occurrences: domain::Occurrences::new(value.occurrences)?,
            feedback: value.coach_comment.map(|comment| domain::CoachFeedback {
                comment,
                unread: value.feedback_unread,
            }),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub workout_id: Uuid,
    pub exercise_id: Uuid,
    pub day_number: u32,
    pub set_number: u32,
    pub exercise_order: String,
    pub target_reps: String,
    pub tempo: String,
    pub rest_seconds: u32,
    pub notes: String,
    pub weight: Option<f32>,
    pub reps: Option<u32>,
    pub completed: bool,
    pub video_url: Option<String>,
    pub coach_comment: Option<String>,
}

impl From<domain::LogEntry> for LogEntry {
    fn from(value: domain::LogEntry) -> Self {
        Self::from(&value)
    }
}

impl From<&domain::LogEntry> for LogEntry {
    fn from(value: &domain::LogEntry) -> Self {
        Self {
            workout_id: *value.workout_id,
            exercise_id: *value.exercise_id,
            day_number: value.day.into(),
            set_number: value.set.into(),
            exercise_order: value.order.to_string(),
            target_reps: value.target_reps.to_string(),
            tempo: value.tempo.to_string(),
            rest_seconds: value.rest.into(),
            notes: value.notes.clone(),
            weight: value.weight.map(f32::from),
            reps: value.reps.map(u32::from),
            completed: value.completed,
            video_url: value.video_url.clone(),
            coach_comment: value.coach_comment.clone(),
        }
    }
}

impl TryFrom<LogEntry> for domain::LogEntry {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(value: LogEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            workout_id: value.workout_id.into(),
            exercise_id: value.exercise_id.into(),
            day: domain::DayNumber::new(value.day_number)?,
            set: domain::SetNumber::new(value.set_number)?,
            order: domain::OrderToken::new(&value.exercise_order)?,
            target_reps: domain::TargetReps::new(&value.target_reps)?,
            tempo: domain::Tempo::new(&value.tempo)?,
            rest: domain::Rest::new(value.rest_seconds)?,
            notes: value.notes,
            weight: value.weight.map(domain::Weight::new).transpose()?,
            reps: value.reps.map(domain::Reps::new).transpose()?,
            completed: value.completed,
            video_url: value.video_url,
            coach_comment: value.coach_comment,
        })
    }
}
