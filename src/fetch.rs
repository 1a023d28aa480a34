//! HTTP helper for issuing requests against the Base44 backend

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use url::Url;

use crate::error::{Error, Result};

/// Helper for building and executing HTTP requests.
///
/// Carries the endpoint path alongside the full URL so error values can
/// report which backend operation failed.
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    endpoint: String,
    method: Method,
    headers: HeaderMap,
    query_params: Option<Vec<(String, String)>>,
    body: Option<Vec<u8>>,
    multipart: Option<reqwest::multipart::Form>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder for `endpoint` relative to `base_url`
    pub fn new(client: &'a Client, base_url: &str, endpoint: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), endpoint),
            endpoint: endpoint.to_string(),
            method,
            headers,
            query_params: None,
            body: None,
            multipart: None,
        }
    }

    /// Add a header to the request, replacing any default of the same name
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Merge caller-supplied headers; caller values take precedence
    pub fn headers(mut self, extra: &HashMap<String, String>) -> Self {
        for (name, value) in extra {
            self = self.header(name, value);
        }
        self
    }

    /// Add bearer token authentication to the request
    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {}", token))
    }

    /// Add bearer token authentication when a token is present
    pub fn maybe_bearer_auth(self, token: Option<&str>) -> Self {
        match token {
            Some(token) => self.bearer_auth(token),
            None => self,
        }
    }

    /// Add query parameters to the request
    pub fn query(mut self, params: Vec<(String, String)>) -> Self {
        self.query_params = Some(params);
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    /// Replace the body with a multipart form. Content type is set by the
    /// transport from the form boundary.
    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.headers.remove(CONTENT_TYPE);
        self.multipart = Some(form);
        self
    }

    fn build(self) -> Result<(RequestBuilder, String)> {
        let mut url = Url::parse(&self.url)?;

        if let Some(params) = self.query_params.as_ref().filter(|p| !p.is_empty()) {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in params {
                query_pairs.append_pair(key, value);
            }
        }

        let mut req = self.client.request(self.method, url.as_str());
        req = req.headers(self.headers);

        if let Some(form) = self.multipart {
            req = req.multipart(form);
        } else if let Some(body) = self.body {
            req = req.body(body);
        }

        Ok((req, self.endpoint))
    }

    /// Execute the request and parse the response as JSON.
    ///
    /// Non-success statuses become [`Error::Api`] carrying the status and
    /// endpoint; a success body that is not valid JSON of the expected
    /// shape becomes [`Error::Decode`].
    pub async fn execute<T: DeserializeOwned>(self) -> Result<T> {
        let (req, endpoint) = self.build()?;
        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("{} returned status {}", endpoint, status);
            return Err(Error::api(status.as_u16(), &endpoint));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(Error::Decode)
    }

    /// Execute the request and return the raw response
    pub async fn execute_raw(self) -> Result<reqwest::Response> {
        let (req, _) = self.build()?;
        let response = req.send().await?;
        Ok(response)
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, base_url: &str, endpoint: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, base_url, endpoint, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, base_url: &str, endpoint: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, base_url, endpoint, Method::POST)
    }

    /// Create a PATCH request
    pub fn patch<'a>(client: &'a Client, base_url: &str, endpoint: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, base_url, endpoint, Method::PATCH)
    }

    /// Create a request with an arbitrary method
    pub fn request<'a>(
        client: &'a Client,
        base_url: &str,
        endpoint: &str,
        method: Method,
    ) -> FetchBuilder<'a> {
        FetchBuilder::new(client, base_url, endpoint, method)
    }
}
