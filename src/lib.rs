//! Base44 Rust Client Library
//!
//! A Rust client for the Base44 agricultural marketplace backend,
//! providing authenticated access to user profiles, marketplace entities
//! (listings, market trends, quality reports) and backend integrations
//! (file upload, LLM invocation).
//!
//! All business logic lives in the backend; this crate only orchestrates
//! session state and HTTP calls. Each call is a single best-effort
//! attempt: no retries, no backoff, no caching.

pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod fetch;
pub mod integrations;
pub mod session;

use reqwest::{Client, Method};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::{Auth, Navigator, NoopNavigator};
use crate::config::ClientOptions;
use crate::entities::{Collection, MarketListing, MarketTrend, QualityReport};
use crate::error::Result;
use crate::fetch::Fetch;
use crate::integrations::IntegrationsClient;
use crate::session::{MemoryTokenStore, TokenStore};

/// The main entry point for the Base44 Rust client
pub struct Base44 {
    /// The base URL for the backend
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Persisted token slot shared by every sub-client
    store: Arc<dyn TokenStore>,
    /// Auth client for login, registration and the current user
    pub auth: Auth,
    /// Client options
    pub options: ClientOptions,
}

impl Base44 {
    /// Create a new Base44 client with an in-memory session
    ///
    /// # Example
    ///
    /// ```
    /// use base44_rust::Base44;
    ///
    /// let base44 = Base44::new("https://api.base44.com");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::new_with_options(
            base_url,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(NoopNavigator),
            ClientOptions::default(),
        )
    }

    /// Create a client against the host named by `BASE44_API_URL`,
    /// defaulting to the production host when unset
    pub fn from_env() -> Self {
        Self::new(&config::base_url_from_env())
    }

    /// Create a new Base44 client with a custom token store, navigator
    /// and options
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use base44_rust::auth::NoopNavigator;
    /// use base44_rust::config::ClientOptions;
    /// use base44_rust::session::FileTokenStore;
    /// use base44_rust::Base44;
    ///
    /// let base44 = Base44::new_with_options(
    ///     "https://api.base44.com",
    ///     Arc::new(FileTokenStore::new("/tmp/base44_token")),
    ///     Arc::new(NoopNavigator),
    ///     ClientOptions::default(),
    /// );
    /// ```
    pub fn new_with_options(
        base_url: &str,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        options: ClientOptions,
    ) -> Self {
        let http_client = match options.request_timeout {
            Some(timeout) => Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
                log::warn!("HTTP client build with timeout failed, using defaults: {}", e);
                Client::new()
            }),
            None => Client::new(),
        };

        let auth = Auth::new(
            base_url,
            http_client.clone(),
            store.clone(),
            navigator,
            options.clone(),
        );

        Self {
            url: base_url.to_string(),
            http_client,
            store,
            auth,
            options,
        }
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Issue an authenticated request against an arbitrary endpoint.
    ///
    /// The bearer token, when one is stored, is attached at call time;
    /// `Content-Type: application/json` is sent unless overridden by a
    /// caller-supplied header. Non-success statuses fail with
    /// [`error::Error::Api`] carrying the status and endpoint.
    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value> {
        let token = self.store.get();

        let mut builder = Fetch::request(&self.http_client, &self.url, endpoint, method)
            .header("X-Client-Info", &self.options.client_info)
            .maybe_bearer_auth(token.as_deref());

        if let Some(extra) = headers {
            builder = builder.headers(extra);
        }
        if let Some(body) = body {
            builder = builder.json(body)?;
        }

        builder.execute().await
    }

    /// Handle on an arbitrary entity collection
    ///
    /// # Example
    ///
    /// ```
    /// use base44_rust::entities::MarketListing;
    /// use base44_rust::Base44;
    ///
    /// let base44 = Base44::new("https://api.base44.com");
    /// let listings = base44.collection::<MarketListing>("MarketListing");
    /// ```
    pub fn collection<T: serde::de::DeserializeOwned>(&self, name: &str) -> Collection<T> {
        Collection::new(&self.url, name, self.http_client.clone(), self.store.clone())
    }

    /// Marketplace listings
    pub fn market_listings(&self) -> Collection<MarketListing> {
        self.collection("MarketListing")
    }

    /// Market-analysis snapshots
    pub fn market_trends(&self) -> Collection<MarketTrend> {
        self.collection("MarketTrend")
    }

    /// Produce quality reports
    pub fn quality_reports(&self) -> Collection<QualityReport> {
        self.collection("QualityReport")
    }

    /// Get a client for backend integrations (LLM invocation, file upload)
    pub fn integrations(&self) -> IntegrationsClient {
        IntegrationsClient::new(&self.url, self.http_client.clone(), self.store.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::AuthState;
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::Base44;
}
