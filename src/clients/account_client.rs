use crate::account_actor::AccountError;
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{AccountCreate, Client, ClientId, ClientProfile, ClientUpdate, Credentials};
use crate::services::{AccountRegistry, RegistrationError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the account store.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Client>,
}

impl AccountClient {
    pub fn new(inner: ResourceClient<Client>) -> Self {
        Self { inner }
    }

    /// Persists a new client and its linked identity.
    ///
    /// Fails with [`AccountError::DuplicateIdentity`] when the username or email is
    /// already in use, whatever the letter case.
    #[instrument(skip(self, account), fields(username = %account.credentials.username))]
    pub async fn create_account(&self, account: AccountCreate) -> Result<Client, AccountError> {
        info!("Sending create_account to actor");
        self.inner.create(account).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Client>, AccountError> {
        debug!("Looking up client");
        let wanted = username.to_lowercase();
        let matches = self
            .inner
            .find(move |client: &Client| client.user.username.to_lowercase() == wanted)
            .await
            .map_err(Self::map_error)?;
        Ok(matches.into_iter().next())
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, id: ClientId, update: ClientUpdate) -> Result<Client, AccountError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Client> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &ResourceClient<Client> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::Conflict(key) => AccountError::DuplicateIdentity(key),
            FrameworkError::NotFound(id) => AccountError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<AccountError>() {
                Ok(err) => *err,
                Err(other) => AccountError::ActorCommunicationError(other.to_string()),
            },
            other => AccountError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl AccountRegistry for AccountClient {
    async fn register_account(
        &self,
        profile: ClientProfile,
        credentials: Credentials,
    ) -> Result<Client, RegistrationError> {
        self.create_account(AccountCreate {
            profile,
            credentials,
        })
        .await
        .map_err(|e| match e {
            AccountError::DuplicateIdentity(key) => RegistrationError::DuplicateIdentity(key),
            other => RegistrationError::Failure(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::model::AppUser;
    use secrecy::SecretString;

    fn account() -> AccountCreate {
        AccountCreate {
            profile: ClientProfile {
                full_name: "Test User".into(),
                phone_number: "1234567890".into(),
            },
            credentials: Credentials {
                username: "testUser".into(),
                password: SecretString::from("testPass".to_string()),
                email: "test@example.com".into(),
                enabled: true,
            },
        }
    }

    fn stored() -> Client {
        Client {
            id: ClientId(1),
            full_name: "Test User".into(),
            phone_number: "1234567890".into(),
            user: AppUser {
                username: "testUser".into(),
                email: "test@example.com".into(),
                enabled: true,
            },
        }
    }

    #[tokio::test]
    async fn conflict_becomes_duplicate_identity() {
        let mut mock = MockClient::<Client>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("email:test@example.com".into()));
        let client = AccountClient::new(mock.client());

        let result = client.create_account(account()).await;

        assert_eq!(
            result,
            Err(AccountError::DuplicateIdentity("email:test@example.com".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn entity_errors_keep_their_type() {
        let mut mock = MockClient::<Client>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(AccountError::ValidationError(
                "username must not be blank".into(),
            ))));
        let client = AccountClient::new(mock.client());

        let result = client.create_account(account()).await;

        assert_eq!(
            result,
            Err(AccountError::ValidationError("username must not be blank".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn registry_reports_duplicates_and_failures_apart() {
        let mut mock = MockClient::<Client>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("username:testuser".into()));
        mock.expect_create().return_err(FrameworkError::ActorClosed);
        let client = AccountClient::new(mock.client());

        let (profile, credentials) = (account().profile, account().credentials);
        let duplicate = client.register_account(profile, credentials).await;
        assert!(matches!(duplicate, Err(RegistrationError::DuplicateIdentity(_))));

        let (profile, credentials) = (account().profile, account().credentials);
        let failure = client.register_account(profile, credentials).await;
        assert!(matches!(failure, Err(RegistrationError::Failure(_))));
        mock.verify();
    }

    #[tokio::test]
    async fn find_by_username_returns_match() {
        let mut mock = MockClient::<Client>::new();
        mock.expect_find().return_ok(vec![stored()]);
        let client = AccountClient::new(mock.client());

        let found = client.find_by_username("TESTUSER").await.unwrap();

        assert_eq!(found, Some(stored()));
        mock.verify();
    }
}
