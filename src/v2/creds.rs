/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::SmugMugError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::Url;
use urlencoding::encode;

/// Credentials used to access the API.
///
/// Only the API key is needed for public, read only access. Accessing private
/// data or uploading requires the full set of OAuth1 tokens; getting the Access
/// Token/Secret is left up to the consumer of this library.
#[derive(Default, Clone)]
pub struct Creds {
    consumer_api_key: String,
    consumer_api_secret: Option<String>,
    access_token: Option<String>,
    token_secret: Option<String>,
}

impl Creds {
    pub fn from_tokens(
        consumer_api_key: &str,
        consumer_api_secret: Option<&str>,
        access_token: Option<&str>,
        token_secret: Option<&str>,
    ) -> Self {
        Self {
            consumer_api_key: consumer_api_key.into(),
            consumer_api_secret: consumer_api_secret.map(Into::into),
            access_token: access_token.map(Into::into),
            token_secret: token_secret.map(Into::into),
        }
    }

    /// Only the API key is available so requests cannot be signed
    pub fn is_read_only(&self) -> bool {
        self.consumer_api_secret.is_none() || self.access_token.is_none()
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.consumer_api_key
    }

    /// Builds the OAuth1 `Authorization` header for the request or `None` for read only creds
    pub(crate) fn authorization(
        &self,
        method: &str,
        url: &Url,
    ) -> Result<Option<String>, SmugMugError> {
        let (Some(consumer_secret), Some(token)) = (
            self.consumer_api_secret.as_deref(),
            self.access_token.as_deref(),
        ) else {
            return Ok(None);
        };

        let nonce = format!("{:016x}{:016x}", rand::random::<u64>(), rand::random::<u64>());
        let timestamp = Utc::now().timestamp().to_string();
        let mut oauth_params = vec![
            ("oauth_consumer_key", self.consumer_api_key.as_str()),
            ("oauth_nonce", nonce.as_str()),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", token),
            ("oauth_version", "1.0"),
        ];

        let signature = sign(
            method,
            url,
            &oauth_params,
            consumer_secret,
            self.token_secret.as_deref().unwrap_or_default(),
        )?;
        oauth_params.push(("oauth_signature", signature.as_str()));

        let header = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(Some(format!("OAuth {}", header)))
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creds")
            .field("consumer_api_key", &"xxx")
            .field("consumer_api_secret", &"xxx")
            .field("access_token", &"xxx")
            .field("token_secret", &"xxx")
            .finish()
    }
}

// HMAC-SHA1 signature over the request per RFC 5849 section 3.4
fn sign(
    method: &str,
    url: &Url,
    oauth_params: &[(&str, &str)],
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, SmugMugError> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k).into_owned(), encode(&v).into_owned()))
        .collect();
    params.extend(
        oauth_params
            .iter()
            .map(|(k, v)| (encode(k).into_owned(), encode(v).into_owned())),
    );
    params.sort();
    let normalized = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);

    let base_string = format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(base_url.as_str()),
        encode(&normalized)
    );
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));

    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .map_err(|e| SmugMugError::Auth(e.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
