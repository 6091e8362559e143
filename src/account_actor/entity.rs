//! ActorEntity implementation for the Client domain type.
//!
//! See the trait implementation on [`Client`] for method documentation.

use super::AccountError;
use crate::framework::ActorEntity;
use crate::model::{AccountCreate, AppUser, Client, ClientId, ClientUpdate};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Client {
    type Id = ClientId;
    type CreateParams = AccountCreate;
    type UpdateParams = ClientUpdate;
    type Context = ();
    type Error = AccountError;

    /// Builds the client profile and its linked identity.
    ///
    /// The password is consumed here and not retained: authentication belongs to the
    /// identity provider, not to the account store.
    fn from_create_params(id: ClientId, params: AccountCreate) -> Result<Self, AccountError> {
        let AccountCreate {
            profile,
            credentials,
        } = params;

        let username = credentials.username.trim().to_string();
        if username.is_empty() {
            return Err(AccountError::ValidationError("username must not be blank".into()));
        }
        let email = credentials.email.trim().to_string();
        if !email.contains('@') {
            return Err(AccountError::ValidationError(format!("invalid email: {email}")));
        }

        Ok(Self {
            id,
            full_name: profile.full_name,
            phone_number: profile.phone_number,
            user: AppUser {
                username,
                email,
                enabled: credentials.enabled,
            },
        })
    }

    /// Username and email, lower-cased and tagged so the two never collide with each other.
    fn unique_keys(&self) -> Vec<String> {
        vec![
            format!("username:{}", self.user.username.to_lowercase()),
            format!("email:{}", self.user.email.to_lowercase()),
        ]
    }

    /// Handles profile updates.
    ///
    /// # Fields Updated
    /// - `full_name`
    /// - `phone_number`
    async fn on_update(&mut self, update: ClientUpdate, _ctx: &()) -> Result<(), AccountError> {
        if let Some(full_name) = update.full_name {
            self.full_name = full_name;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        Ok(())
    }
}
