//! Authentication and session management for the Base44 backend

mod types;

use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::session::TokenStore;

pub use types::*;

/// Seam for full-page navigation side effects (logout redirect, external
/// login page). Embedders plug in whatever drives their UI; the default
/// does nothing, which is correct for headless use.
pub trait Navigator: Send + Sync {
    /// Navigate the client to `location` (a path or absolute URL)
    fn navigate(&self, location: &str);
}

/// Navigator that performs no navigation
#[derive(Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _location: &str) {}
}

/// Client for Base44 authentication and the current-user profile
pub struct Auth {
    /// The base URL for the backend
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Persisted token slot, shared with the generic API client
    store: Arc<dyn TokenStore>,

    /// Navigation side-effect seam
    navigator: Arc<dyn Navigator>,

    /// Client options
    options: ClientOptions,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(
        url: &str,
        client: Client,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        options: ClientOptions,
    ) -> Self {
        Self {
            url: url.to_string(),
            client,
            store,
            navigator,
            options,
        }
    }

    /// Resolve the current user.
    ///
    /// Returns [`AuthState::Guest`] when no token is stored, without
    /// touching the network. With a token, asks the backend who we are;
    /// any failure (transport, non-success status, malformed payload)
    /// also degrades to `Guest`. Callers treat `Guest` as "not logged
    /// in", never as an error to retry.
    pub async fn current_user(&self) -> AuthState {
        let token = match self.store.get() {
            Some(token) => token,
            None => return AuthState::Guest,
        };

        let result = Fetch::get(&self.client, &self.url, "/auth/me")
            .header("X-Client-Info", &self.options.client_info)
            .bearer_auth(&token)
            .execute::<MeResponse>()
            .await;

        match result {
            Ok(me) => AuthState::Authenticated(me.user),
            Err(e) => {
                log::warn!("current-user check failed, treating as guest: {}", e);
                AuthState::Guest
            }
        }
    }

    /// Log in with email and password.
    ///
    /// On success the returned token is persisted and the user returned.
    /// A rejected login fails with [`Error::Authentication`] and leaves
    /// the token store untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let payload = json!({
            "email": email,
            "password": password,
        });

        let result = Fetch::post(&self.client, &self.url, "/auth/login")
            .header("X-Client-Info", &self.options.client_info)
            .json(&payload)?
            .execute::<AuthResponse>()
            .await;

        let response = match result {
            Ok(response) => response,
            // Credential details never leave this function.
            Err(Error::Api { .. }) => return Err(Error::Authentication),
            Err(e) => return Err(e),
        };

        self.store.set(&response.token);
        Ok(response.user)
    }

    /// Register a new account. Fails with [`Error::Registration`] when the
    /// backend rejects the submission (invalid fields, duplicate email).
    pub async fn register(&self, registration: &Registration) -> Result<RegistrationResult> {
        let result = Fetch::post(&self.client, &self.url, "/auth/register")
            .header("X-Client-Info", &self.options.client_info)
            .json(registration)?
            .execute::<RegistrationResult>()
            .await;

        match result {
            Ok(outcome) => Ok(outcome),
            Err(Error::Api { status, .. }) => Err(Error::registration(format!(
                "backend rejected registration with status {}",
                status
            ))),
            Err(e) => Err(e),
        }
    }

    /// Update the current user's profile. `None` fields are left as-is.
    pub async fn update_me(&self, update: &UserUpdate) -> Result<User> {
        let token = self.store.get();

        let me = Fetch::patch(&self.client, &self.url, "/auth/me")
            .header("X-Client-Info", &self.options.client_info)
            .maybe_bearer_auth(token.as_deref())
            .json(update)?
            .execute::<MeResponse>()
            .await?;

        Ok(me.user)
    }

    /// Log out: clear the persisted token and navigate home.
    ///
    /// Purely client-side; the backend is not called, and calling this
    /// with no session is a no-op.
    pub fn logout(&self) {
        self.store.clear();
        self.navigator.navigate("/");
    }

    /// The external login page URL with `return_url` embedded, so the
    /// identity provider can send the user back after authenticating
    pub fn login_url(&self, return_url: &str) -> String {
        format!(
            "{}/auth/login?redirect={}",
            self.url.trim_end_matches('/'),
            urlencoding::encode(return_url)
        )
    }

    /// Perform a full client navigation to the external login page
    pub fn redirect_to_login(&self, return_url: &str) {
        self.navigator.navigate(&self.login_url(return_url));
    }
}
