use folio_shared::Session;
use reqwest::{Method, RequestBuilder};

use crate::auth::AuthClient;
use crate::config::BackendConfig;
use crate::error::Result;
use crate::storage::StorageClient;
use crate::table::TableClient;

/// Shared HTTP client for every backend surface
#[derive(Debug, Clone)]
pub struct Backend {
    http: reqwest::Client,
    config: BackendConfig,
}

impl Backend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(self)
    }

    /// Table access, as the signed-in user when a session is given
    pub fn tables<'a>(&'a self, session: Option<&'a Session>) -> TableClient<'a> {
        TableClient::new(self, session.map(|s| s.access_token.as_str()))
    }

    pub fn storage<'a>(&'a self, session: Option<&'a Session>) -> StorageClient<'a> {
        StorageClient::new(self, session.map(|s| s.access_token.as_str()))
    }

    /// Request carrying the API key, authorized by `token` or else the anon key.
    pub(crate) fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let bearer = token.unwrap_or(self.config.anon_key.as_str());
        self.http
            .request(method, self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }
}
