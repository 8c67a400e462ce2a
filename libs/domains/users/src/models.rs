use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A registered user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

impl User {
    /// New user with a freshly generated id
    pub fn new(input: CreateUser) -> Self {
        Self {
            user_id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
        }
    }
}

/// Request body for `POST /api/user`.
///
/// Missing fields deserialize as empty strings so they fail validation
/// (400) rather than deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateUser {
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Ana")]
    pub name: String,

    #[validate(email)]
    #[schema(example = "ana@x.com")]
    pub email: String,
}

impl CreateUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Public representation of a [`User`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        assert!(CreateUser::new("Ana", "ana@x.com").validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        for name in ["", "   ", "\t\n"] {
            let errors = CreateUser::new(name, "ana@x.com").validate().unwrap_err();
            assert!(errors.field_errors().contains_key("name"), "{:?}", name);
        }
    }

    #[test]
    fn test_malformed_email_rejected() {
        for email in ["", "ana", "ana@", "@x.com", "ana x@x.com"] {
            let errors = CreateUser::new("Ana", email).validate().unwrap_err();
            assert!(errors.field_errors().contains_key("email"), "{:?}", email);
        }
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let input: CreateUser = serde_json::from_str("{}").unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_response_is_camel_case() {
        let user = User::new(CreateUser::new("Ana", "ana@x.com"));
        let json = serde_json::to_value(UserResponse::from(user.clone())).unwrap();

        assert_eq!(json["userId"], user.user_id.to_string());
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["email"], "ana@x.com");
    }
}
