/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::api::{ApiClient, ApiParams, ApiResponse};
use crate::v2::creds::Creds;
use crate::v2::errors::SmugMugError;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// Handle used by every request. Cloning is cheap; clones share the
/// underlying connection pool and credentials.
///
/// ```rust,no_run
/// use smugmug_client::v2::{ApiOptions, Client, Creds, User};
///
/// # async fn run() -> Result<(), smugmug_client::v2::SmugMugError> {
/// let client = Client::new(Creds::from_tokens("api key", None, None, None));
/// let user = User::from_id(client.clone(), "apidemo", &ApiOptions::default()).await?;
/// println!("{}", user.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    api_client: Arc<ApiClient>,
}

impl Client {
    pub fn new(creds: Creds) -> Self {
        Self {
            api_client: Arc::new(ApiClient::new(creds)),
        }
    }

    /// Creates a client that talks to the given API and upload origins instead of SmugMug's
    pub fn with_origins(creds: Creds, api_origin: &str, upload_origin: &str) -> Self {
        Self {
            api_client: Arc::new(ApiClient::with_origins(creds, api_origin, upload_origin)),
        }
    }

    /// Lower level access to the raw API
    pub fn api(&self) -> &ApiClient {
        &self.api_client
    }

    /// Resolves an API path such as `/api/v2/node/abc` into a full url
    pub fn endpoint(&self, uri: &str) -> Result<Url, SmugMugError> {
        self.api_client.endpoint(uri)
    }

    /// Performs a get request to the SmugMug API
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &ApiParams,
    ) -> Result<ApiResponse<T>, SmugMugError> {
        self.api_client.get::<T>(url, params).await
    }
}
