/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::creds::Creds;
use crate::v2::errors::SmugMugError;
use crate::v2::expansion::Expansions;
use bytes::Bytes;
use log::debug;
use num_enum::TryFromPrimitive;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

// Root SmugMug API
pub const API_ORIGIN: &str = "https://api.smugmug.com";

// Root of the upload service
pub const UPLOAD_ORIGIN: &str = "https://upload.smugmug.com";

const AGENT: &str = concat!("smugmug-client/", env!("CARGO_PKG_VERSION"));

/// This can be filter types as well as other parameters the specific API expects
pub type ApiParams = [(String, String)];

/// Directly communicates with the API.
#[derive(Clone)]
pub struct ApiClient {
    creds: Creds,
    https_client: reqwest::Client,
    api_origin: String,
    upload_origin: String,
}

impl ApiClient {
    /// Creates a new client against the production API
    pub fn new(creds: Creds) -> Self {
        Self::with_origins(creds, API_ORIGIN, UPLOAD_ORIGIN)
    }

    /// Creates a new client against the provided API and upload origins
    pub fn with_origins(creds: Creds, api_origin: &str, upload_origin: &str) -> Self {
        Self {
            creds,
            https_client: reqwest::Client::new(),
            api_origin: api_origin.into(),
            upload_origin: upload_origin.into(),
        }
    }

    /// Resolves an API path (or full url) against the API origin
    pub fn endpoint(&self, uri: &str) -> Result<Url, SmugMugError> {
        Ok(Url::parse(&self.api_origin)?.join(uri)?)
    }

    /// Resolves the upload target for a file name
    pub(crate) fn upload_endpoint(&self, name: &str) -> Result<Url, SmugMugError> {
        Ok(Url::parse(&self.upload_origin)?.join(&urlencoding::encode(name))?)
    }

    /// Performs a get request to the SmugMug API
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &ApiParams,
    ) -> Result<ApiResponse<T>, SmugMugError> {
        let mut req_url = url;
        {
            let mut query = req_url.query_pairs_mut();
            query.extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            if self.creds.is_read_only() {
                query.append_pair("APIKey", self.creds.api_key());
            }
        }
        debug!("GET {}", req_url);

        let mut request = self
            .https_client
            .get(req_url.clone())
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, AGENT);
        if let Some(auth) = self.creds.authorization("GET", &req_url)? {
            request = request.header(AUTHORIZATION, auth);
        }

        let resp = request.send().await?;
        let status_err = resp.error_for_status_ref().err();
        let body = resp.bytes().await?;
        match serde_json::from_slice::<ResponseBody<T>>(&body) {
            Ok(body) => {
                if !body.is_success_code() {
                    match ApiErrorCodes::try_from(body.code) {
                        Ok(known) => debug!("GET failed with {:?}", known),
                        Err(_) => debug!("GET failed with unlisted code {}", body.code),
                    }
                    return Err(SmugMugError::ApiResponse(body.code, body.message));
                }
                Ok(ApiResponse {
                    payload: body.response,
                    expansions: body.expansions,
                })
            }
            Err(err) => Err(status_err.map_or(SmugMugError::ApiResponseMalformed(err), SmugMugError::Request)),
        }
    }

    /// Performs a put of raw data to the upload service
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        headers: &[(&str, String)],
        data: Bytes,
    ) -> Result<T, SmugMugError> {
        debug!("PUT {} ({} bytes)", url, data.len());
        let mut request = self
            .https_client
            .put(url.clone())
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, AGENT);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        if let Some(auth) = self.creds.authorization("PUT", &url)? {
            request = request.header(AUTHORIZATION, auth);
        }

        let resp = request.body(data).send().await?;
        let status_err = resp.error_for_status_ref().err();
        let body = resp.bytes().await?;
        serde_json::from_slice::<T>(&body)
            .map_err(|err| status_err.map_or(SmugMugError::ApiResponseMalformed(err), SmugMugError::Request))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_origin", &self.api_origin)
            .field("upload_origin", &self.upload_origin)
            .finish()
    }
}

/// Decoded response: the requested payload and any side-loaded expansions
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub payload: Option<T>,
    pub expansions: Expansions,
}

/// Error codes per the SmugMug API site
#[derive(Debug, TryFromPrimitive)]
#[repr(u32)]
pub enum ApiErrorCodes {
    // Good Codes
    Ok = 200,
    CreatedSuccessfully = 201,
    Accepted = 202,
    MovedPermanently = 301,
    MovedTemporarily = 302,

    // Failing Codes
    BadRequest = 400,
    Unauthorized = 401,
    PaymentRequired = 402,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    BadAccept = 406,
    Conflict = 409,
    TooManyRequests = 429,
    InternalServerError = 500,
    ServiceUnavailable = 503,
}

// Base expected response body to be returned from the API
#[derive(Deserialize, Debug)]
struct ResponseBody<ResponseType> {
    #[serde(rename = "Code")]
    code: u32,

    #[serde(rename = "Message")]
    message: String,

    #[serde(rename = "Response")]
    response: Option<ResponseType>,

    #[serde(default, rename = "Expansions")]
    expansions: Expansions,
}

impl<ResponseType> ResponseBody<ResponseType> {
    /// Any 2xx or 3xx code is a success, whether or not it is one listed in [`ApiErrorCodes`]
    fn is_success_code(&self) -> bool {
        (200..400).contains(&self.code)
    }
}
