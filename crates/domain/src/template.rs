use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{
    BlueprintItem, CreateError, DeleteError, Name, ReadError, Session, UpdateError,
    ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait TemplateService: Send + Sync + 'static {
    async fn get_templates(&self, session: &Session) -> Result<Vec<Template>, ReadError>;
    async fn create_template(
        &self,
        session: &Session,
        name: Name,
        description: String,
        items: Vec<BlueprintItem>,
    ) -> Result<Template, CreateError>;
    async fn modify_template(
        &self,
        session: &Session,
        id: TemplateID,
        name: Option<Name>,
        description: Option<String>,
        items: Option<Vec<BlueprintItem>>,
    ) -> Result<Template, UpdateError>;
    async fn delete_template(
        &self,
        session: &Session,
        id: TemplateID,
    ) -> Result<TemplateID, DeleteError>;

    async fn validate_template_name(
        &self,
        session: &Session,
        name: &str,
        id: TemplateID,
    ) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => match self.get_templates(session).await {
                Ok(templates) => {
                    if templates.iter().all(|t| t.id == id || t.name != name) {
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
pub trait TemplateRepository {
    async fn read_templates(&self) -> Result<Vec<Template>, ReadError>;
    async fn read_template(&self, id: TemplateID) -> Result<Template, ReadError>;
    async fn create_template(&self, template: Template) -> Result<Template, CreateError>;
    async fn modify_template(
        &self,
        id: TemplateID,
        name: Option<Name>,
        description: Option<String>,
        items: Option<Vec<BlueprintItem>>,
    ) -> Result<Template, UpdateError>;
    async fn delete_template(&self, id: TemplateID) -> Result<TemplateID, DeleteError>;
}

/// Reusable workout plan. Creating a workout from a template copies the
/// items by value, later template edits leave existing workouts alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateID,
    pub name: Name,
    pub description: String,
    pub items: Vec<BlueprintItem>,
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TemplateID(Uuid);

impl TemplateID {
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

impl From<Uuid> for TemplateID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for TemplateID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
