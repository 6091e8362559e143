use crate::model::{Client, RegistrationForm};
use crate::services::{AccountRegistry, RegistrationError};
use tracing::{error, info, instrument, warn};

pub const DUPLICATE_IDENTITY_MESSAGE: &str = "Username or email already exists.";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed.";

/// What the user sees after submitting the registration form.
///
/// Duplicates never say which of username or email collided.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    Success(Client),
    Duplicate(&'static str),
    Failure(&'static str),
}

impl RegistrationOutcome {
    /// The message shown to the user, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            RegistrationOutcome::Success(_) => None,
            RegistrationOutcome::Duplicate(message) | RegistrationOutcome::Failure(message) => Some(message),
        }
    }
}

/// Registers the client described by `form` and classifies the result.
///
/// The registry is called exactly once; there is no retry on failure.
#[instrument(skip_all, fields(username = %form.username))]
pub async fn resolve_registration<R>(form: RegistrationForm, registry: &R) -> RegistrationOutcome
where
    R: AccountRegistry + ?Sized,
{
    let (profile, credentials) = form.into_parts();
    match registry.register_account(profile, credentials).await {
        Ok(client) => {
            info!(client_id = %client.id, "Client registered");
            RegistrationOutcome::Success(client)
        }
        Err(RegistrationError::DuplicateIdentity(key)) => {
            warn!(%key, "Registration rejected, identity taken");
            RegistrationOutcome::Duplicate(DUPLICATE_IDENTITY_MESSAGE)
        }
        Err(RegistrationError::Failure(reason)) => {
            error!(%reason, "Registration failed");
            RegistrationOutcome::Failure(REGISTRATION_FAILED_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppUser, ClientId, ClientProfile, Credentials};
    use async_trait::async_trait;
    use secrecy::SecretString;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeRegistry {
        calls: AtomicUsize,
        answer: Result<(), RegistrationError>,
    }

    impl FakeRegistry {
        fn answering(answer: Result<(), RegistrationError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                answer,
            }
        }
    }

    #[async_trait]
    impl AccountRegistry for FakeRegistry {
        async fn register_account(
            &self,
            profile: ClientProfile,
            credentials: Credentials,
        ) -> Result<Client, RegistrationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone().map(|_| Client {
                id: ClientId(1),
                full_name: profile.full_name,
                phone_number: profile.phone_number,
                user: AppUser {
                    username: credentials.username,
                    email: credentials.email,
                    enabled: credentials.enabled,
                },
            })
        }
    }

    fn form() -> RegistrationForm {
        RegistrationForm {
            username: "testUser".into(),
            password: SecretString::from("testPass".to_string()),
            email: "test@example.com".into(),
            enabled: true,
            full_name: "Test User".into(),
            phone_number: "1234567890".into(),
        }
    }

    #[tokio::test]
    async fn success_carries_the_new_client() {
        let registry = FakeRegistry::answering(Ok(()));

        let outcome = resolve_registration(form(), &registry).await;

        match outcome {
            RegistrationOutcome::Success(client) => {
                assert_eq!(client.user.username, "testUser");
                assert_eq!(client.full_name, "Test User");
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(registry.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn duplicate_message_does_not_reveal_the_field() {
        for key in ["username:testuser", "email:test@example.com"] {
            let registry = FakeRegistry::answering(Err(RegistrationError::DuplicateIdentity(key.into())));

            let outcome = resolve_registration(form(), &registry).await;

            assert_eq!(outcome, RegistrationOutcome::Duplicate(DUPLICATE_IDENTITY_MESSAGE));
            assert_eq!(outcome.message(), Some("Username or email already exists."));
            assert_eq!(registry.calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn other_failures_are_generic() {
        let registry = FakeRegistry::answering(Err(RegistrationError::Failure("store closed".into())));

        let outcome = resolve_registration(form(), &registry).await;

        assert_eq!(outcome, RegistrationOutcome::Failure(REGISTRATION_FAILED_MESSAGE));
        assert_eq!(outcome.message(), Some("Registration failed."));
        assert_eq!(registry.calls.load(Ordering::SeqCst), 1);
    }
}
