use derive_more::{Deref, Display};
use std::fmt;
use uuid::Uuid;

use log::warn;

use crate::{
    CreateError, DeleteError, Email, Name, ReadError, Session, UpdateError, ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait UserService: Send + Sync + 'static {
    async fn get_users(&self, session: &Session) -> Result<Vec<User>, ReadError>;
    async fn create_user(
        &self,
        session: &Session,
        name: Name,
        email: Email,
        role: Role,
    ) -> Result<User, CreateError>;
    async fn replace_user(&self, session: &Session, user: User) -> Result<User, UpdateError>;
    async fn delete_user(&self, session: &Session, id: UserID) -> Result<UserID, DeleteError>;

    async fn validate_user_email(
        &self,
        session: &Session,
        email: &str,
        id: UserID,
    ) -> Result<Email, ValidationError> {
        match Email::new(email) {
            Ok(email) => match self.get_users(session).await {
                Ok(users) => {
                    if users.iter().all(|u| u.id == id || u.email != email) {
                        Ok(email)
                    } else {
                        Err(ValidationError::Conflict("email".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait UserRepository {
    async fn read_users(&self) -> Result<Vec<User>, ReadError>;
    async fn create_user(&self, user: User) -> Result<User, CreateError>;
    async fn replace_user(&self, user: User) -> Result<User, UpdateError>;
    async fn delete_user(&self, id: UserID) -> Result<UserID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserID,
    pub name: Name,
    pub email: Email,
    pub role: Role,
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(Uuid);

impl UserID {
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

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    #[default]
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "user" => Role::User,
            "admin" => Role::Admin,
            "super_admin" => Role::SuperAdmin,
            _ => {
                warn!("unknown role {value:?}, treating as user");
                Role::User
            }
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Role::User => "user",
                Role::Admin => "admin",
                Role::SuperAdmin => "super_admin",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_user_id_nil() {
        assert!(UserID::nil().is_nil());
        assert_eq!(UserID::nil(), UserID::default());
    }

    #[test]
    fn test_user_id_new() {
        assert!(!UserID::new().is_nil());
        assert_ne!(UserID::new(), UserID::new());
    }

    #[rstest]
    #[case("user", Role::User)]
    #[case("admin", Role::Admin)]
    #[case("super_admin", Role::SuperAdmin)]
    #[case("overlord", Role::User)]
    #[case("", Role::User)]
    fn test_role_from_str(#[case] value: &str, #[case] expected: Role) {
        assert_eq!(Role::from(value), expected);
    }

    #[rstest]
    #[case(Role::User, "user")]
    #[case(Role::Admin, "admin")]
    #[case(Role::SuperAdmin, "super_admin")]
    fn test_role_display(#[case] role: Role, #[case] string: &str) {
        assert_eq!(role.to_string(), string);
    }

    #[rstest]
    #[case(Role::User, false)]
    #[case(Role::Admin, true)]
    #[case(Role::SuperAdmin, true)]
    fn test_role_is_admin(#[case] role: Role, #[case] expected: bool) {
        assert_eq!(role.is_admin(), expected);
    }
}
