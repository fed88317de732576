use std::{fmt, slice::Iter};

use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, Session, UpdateError, ValidationError};

#[allow(async_fn_in_trait)]
pub trait ExerciseService: Send + Sync + 'static {
    async fn get_exercises(&self, session: &Session) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(
        &self,
        session: &Session,
        name: Name,
        body_part: BodyPart,
        video_url: Option<String>,
        notes: String,
    ) -> Result<Exercise, CreateError>;
    async fn replace_exercise(
        &self,
        session: &Session,
        exercise: Exercise,
    ) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(
        &self,
        session: &Session,
        id: ExerciseID,
    ) -> Result<ExerciseID, DeleteError>;

    async fn validate_exercise_name(
        &self,
        session: &Session,
        name: &str,
        id: ExerciseID,
    ) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => match self.get_exercises(session).await {
                Ok(exercises) => {
                    if exercises.iter().all(|e| e.id == id || e.name != name) {
                        Ok(name)
                    } else {
                        Err(ValidationError::Conflict("name".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(&self, exercise: Exercise) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub body_part: BodyPart,
    pub video_url: Option<String>,
    pub notes: String,
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Clone, Copy, Default, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum BodyPart {
    #[default]
    FullBody,
    Chest,
    Back,
    Shoulders,
    Arms,
    Core,
    Legs,
    Calves,
}

impl BodyPart {
    pub fn iter() -> Iter<'static, BodyPart> {
        static BODY_PARTS: [BodyPart; 8] = [
            BodyPart::FullBody,
            BodyPart::Chest,
            BodyPart::Back,
            BodyPart::Shoulders,
            BodyPart::Arms,
            BodyPart::Core,
            BodyPart::Legs,
            BodyPart::Calves,
        ];
        BODY_PARTS.iter()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BodyPart::FullBody => "full_body",
            BodyPart::Chest => "chest",
            BodyPart::Back => "back",
            BodyPart::Shoulders => "shoulders",
            BodyPart::Arms => "arms",
            BodyPart::Core => "core",
            BodyPart::Legs => "legs",
            BodyPart::Calves => "calves",
        }
    }
}

impl TryFrom<&str> for BodyPart {
    type Error = BodyPartError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        BodyPart::iter()
            .find(|b| b.name() == value)
            .copied()
            .ok_or_else(|| BodyPartError::Unknown(value.to_string()))
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum BodyPartError {
    #[error("unknown body part: {0}")]
    Unknown(String),
}
