use crate::account_actor::AccountError;
use crate::clients::AccountClient;
use crate::model::{AppUser, Client, ClientUpdate, RegistrationForm};
use crate::policy::registration::{resolve_registration, RegistrationOutcome, REGISTRATION_FAILED_MESSAGE};
use crate::services::PrincipalSource;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

pub const NO_PROFILE_MESSAGE: &str = "No client profile available.";

/// What the profile page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileView {
    NotAuthenticated,
    /// Authenticated, but no client is linked to the identity.
    NoProfile(&'static str),
    Found { user: AppUser, client: Client },
}

/// Registration and profile pages.
#[derive(Clone)]
pub struct AccountService {
    accounts: AccountClient,
}

impl AccountService {
    pub fn new(accounts: AccountClient) -> Self {
        Self { accounts }
    }

    pub async fn register(&self, form: RegistrationForm) -> RegistrationOutcome {
        resolve_registration(form, &self.accounts).await
    }

    /// Registers from flat request parameters. An unreadable form never reaches the store.
    #[instrument(skip_all)]
    pub async fn register_from_params(&self, params: &HashMap<String, String>) -> RegistrationOutcome {
        match RegistrationForm::from_params(params) {
            Ok(form) => self.register(form).await,
            Err(e) => {
                warn!(error = %e, "Registration form rejected");
                RegistrationOutcome::Failure(REGISTRATION_FAILED_MESSAGE)
            }
        }
    }

    /// Confirms the account behind a fresh login and returns the name to greet.
    #[instrument(skip(self))]
    pub async fn logged_in_view(&self, username: &str) -> Result<String, AccountError> {
        let client = self
            .accounts
            .find_by_username(username)
            .await?
            .ok_or_else(|| AccountError::NotFound(username.to_string()))?;
        info!(client_id = %client.id, "Login confirmed");
        Ok(client.user.username)
    }

    #[instrument(skip_all)]
    pub async fn profile<P>(&self, principal_source: &P) -> Result<ProfileView, AccountError>
    where
        P: PrincipalSource + ?Sized,
    {
        let Some(principal) = principal_source.authenticated_principal() else {
            return Ok(ProfileView::NotAuthenticated);
        };
        match self.accounts.find_by_username(&principal.username).await? {
            Some(client) => Ok(ProfileView::Found {
                user: client.user.clone(),
                client,
            }),
            None => {
                warn!(username = %principal.username, "No client linked to principal");
                Ok(ProfileView::NoProfile(NO_PROFILE_MESSAGE))
            }
        }
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, username: &str, update: ClientUpdate) -> Result<Client, AccountError> {
        let client = self
            .accounts
            .find_by_username(username)
            .await?
            .ok_or_else(|| AccountError::NotFound(username.to_string()))?;
        self.accounts.update_profile(client.id, update).await
    }
}
