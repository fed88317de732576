use crate::{AuthorizationError, DeleteError, ReadError, Role, User, UserID};

/// Identity and role of the requester, resolved against the user store
/// before any operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserID,
    pub role: Role,
}

impl Session {
    #[must_use]
    pub fn new(user_id: UserID, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn require_admin(&self) -> Result<(), AuthorizationError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AuthorizationError::AdminRequired)
        }
    }

    pub fn require_owner_or_admin(&self, owner: UserID) -> Result<(), AuthorizationError> {
        if self.user_id == owner || self.role.is_admin() {
            Ok(())
        } else {
            Err(AuthorizationError::NotOwner)
        }
    }
}

impl From<&User> for Session {
    fn from(value: &User) -> Self {
        Self {
            user_id: value.id,
            role: value.role,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait SessionService: Send + Sync + 'static {
    async fn request_session(&self, user_id: UserID) -> Result<Session, ReadError>;
    async fn initialize_session(&self) -> Result<Session, ReadError>;
    async fn delete_session(&self) -> Result<(), DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn request_session(&self, user_id: UserID) -> Result<Session, ReadError>;
    async fn initialize_session(&self) -> Result<Session, ReadError>;
    async fn delete_session(&self) -> Result<(), DeleteError>;
}
