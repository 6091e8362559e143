use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use thiserror::Error;

/// Type-safe identifier for Clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClientId(pub u64);

impl From<u64> for ClientId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "client_{}", self.0)
    }
}

/// The authentication identity a client is linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUser {
    pub username: String,
    pub email: String,
    pub enabled: bool,
}

/// A registered client profile.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be kept by the account store.
///
/// See [`impl ActorEntity for Client`](#impl-ActorEntity-for-Client) for details on:
/// - Creation parameters ([`AccountCreate`])
/// - Update parameters ([`ClientUpdate`])
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub full_name: String,
    pub phone_number: String,
    pub user: AppUser,
}

/// Profile half of a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientProfile {
    pub full_name: String,
    pub phone_number: String,
}

/// Credential half of a registration. The password never appears in `Debug` output.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
    pub email: String,
    pub enabled: bool,
}

/// Payload for creating a new account.
#[derive(Debug, Clone)]
pub struct AccountCreate {
    pub profile: ClientProfile,
    pub credentials: Credentials,
}

/// Payload for updating an existing client profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

/// The authenticated principal of the current request, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
}

impl Principal {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Raw registration parameters as submitted by the registration form.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub username: String,
    pub password: SecretString,
    pub email: String,
    pub enabled: bool,
    pub full_name: String,
    pub phone_number: String,
}

/// A registration form that could not be read from request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationFormError {
    #[error("Missing registration field: {0}")]
    MissingField(&'static str),
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl RegistrationForm {
    pub const USERNAME: &'static str = "user.username";
    pub const PASSWORD: &'static str = "user.password";
    pub const EMAIL: &'static str = "user.email";
    pub const ENABLED: &'static str = "user.enabled";
    pub const FULL_NAME: &'static str = "fullName";
    pub const PHONE_NUMBER: &'static str = "phoneNumber";

    /// Reads the form from flat request parameters (`user.username`, `fullName`, ...).
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, RegistrationFormError> {
        let field = |name: &'static str| {
            params
                .get(name)
                .cloned()
                .ok_or(RegistrationFormError::MissingField(name))
        };

        let enabled_raw = field(Self::ENABLED)?;
        let enabled = enabled_raw
            .trim()
            .parse::<bool>()
            .map_err(|_| RegistrationFormError::InvalidValue {
                field: Self::ENABLED,
                value: enabled_raw.clone(),
            })?;

        Ok(Self {
            username: field(Self::USERNAME)?,
            password: SecretString::from(field(Self::PASSWORD)?),
            email: field(Self::EMAIL)?,
            enabled,
            full_name: field(Self::FULL_NAME)?,
            phone_number: field(Self::PHONE_NUMBER)?,
        })
    }

    /// Splits the form into the profile and credential halves the registry expects.
    pub fn into_parts(self) -> (ClientProfile, Credentials) {
        (
            ClientProfile {
                full_name: self.full_name,
                phone_number: self.phone_number,
            },
            Credentials {
                username: self.username,
                password: self.password,
                email: self.email,
                enabled: self.enabled,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reads_form_from_request_params() {
        let form = RegistrationForm::from_params(&params(&[
            ("user.username", "testUser"),
            ("user.password", "testPass"),
            ("user.email", "test@example.com"),
            ("user.enabled", "true"),
            ("fullName", "Test User"),
            ("phoneNumber", "1234567890"),
        ]))
        .unwrap();

        assert_eq!(form.username, "testUser");
        assert_eq!(form.email, "test@example.com");
        assert!(form.enabled);

        let (profile, credentials) = form.into_parts();
        assert_eq!(profile.full_name, "Test User");
        assert_eq!(profile.phone_number, "1234567890");
        assert_eq!(credentials.username, "testUser");
    }

    #[test]
    fn missing_field_is_reported() {
        let result = RegistrationForm::from_params(&params(&[
            ("user.username", "testUser"),
            ("user.password", "testPass"),
            ("user.enabled", "true"),
            ("fullName", "Test User"),
            ("phoneNumber", "1234567890"),
        ]));
        assert_eq!(result.unwrap_err(), RegistrationFormError::MissingField("user.email"));
    }

    #[test]
    fn enabled_flag_must_be_boolean() {
        let result = RegistrationForm::from_params(&params(&[
            ("user.username", "testUser"),
            ("user.password", "testPass"),
            ("user.email", "test@example.com"),
            ("user.enabled", "yes"),
            ("fullName", "Test User"),
            ("phoneNumber", "1234567890"),
        ]));
        assert!(matches!(
            result,
            Err(RegistrationFormError::InvalidValue { field: "user.enabled", .. })
        ));
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials {
            username: "alice".into(),
            password: SecretString::from("hunter2".to_string()),
            email: "alice@example.com".into(),
            enabled: true,
        };
        assert!(!format!("{credentials:?}").contains("hunter2"));
    }
}
