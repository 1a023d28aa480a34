//! Generic entity access over the backend's CRUD endpoints

mod types;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::Result;
use crate::fetch::Fetch;
use crate::session::TokenStore;

pub use types::*;

/// Handle on one backend entity collection, e.g. market listings.
///
/// Obtained from [`crate::Base44::collection`] or one of the named
/// accessors. The type parameter is the record type returned by reads;
/// create payloads may be any serializable shape the backend accepts.
pub struct Collection<T> {
    url: String,
    name: String,
    client: Client,
    store: Arc<dyn TokenStore>,
    _record: PhantomData<T>,
}

impl<T: DeserializeOwned> Collection<T> {
    pub(crate) fn new(url: &str, name: &str, client: Client, store: Arc<dyn TokenStore>) -> Self {
        Self {
            url: url.to_string(),
            name: name.to_string(),
            client,
            store,
            _record: PhantomData,
        }
    }

    fn endpoint(&self) -> String {
        format!("/entities/{}", self.name)
    }

    /// Create a record, returning the stored copy with backend-assigned
    /// fields (id, created_date) filled in
    pub async fn create<N: Serialize>(&self, record: &N) -> Result<T> {
        let token = self.store.get();

        Fetch::post(&self.client, &self.url, &self.endpoint())
            .maybe_bearer_auth(token.as_deref())
            .json(record)?
            .execute()
            .await
    }

    /// List records, optionally ordered and limited.
    ///
    /// `order` follows the backend convention of a field name with an
    /// optional leading `-` for descending, e.g. `-created_date`.
    pub async fn list(&self, order: Option<&str>, limit: Option<u32>) -> Result<Vec<T>> {
        let mut params = Vec::new();
        if let Some(order) = order {
            params.push(("order".to_string(), order.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        let token = self.store.get();

        Fetch::get(&self.client, &self.url, &self.endpoint())
            .maybe_bearer_auth(token.as_deref())
            .query(params)
            .execute()
            .await
    }

    /// List records matching the given field equality filters
    pub async fn filter(
        &self,
        filters: &[(&str, &str)],
        order: Option<&str>,
    ) -> Result<Vec<T>> {
        let mut params: Vec<(String, String)> = filters
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        if let Some(order) = order {
            params.push(("order".to_string(), order.to_string()));
        }

        let token = self.store.get();

        Fetch::get(&self.client, &self.url, &self.endpoint())
            .maybe_bearer_auth(token.as_deref())
            .query(params)
            .execute()
            .await
    }
}
