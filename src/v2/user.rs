/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::SmugMugError;
use crate::v2::expansion::{Expandable, Expansions, side_loaded};
use crate::v2::macros::obj_from_url;
use crate::v2::{Album, ApiOptions, Client, Node};
use serde::Deserialize;
use url::Url;

/// Holds information returned from the User API.
///
/// See [SmugMug API Docs](https://api.smugmug.com/api/v2/doc/reference/user.html) for more
/// details on the individual fields.
#[derive(Deserialize, Clone, Debug)]
pub struct User {
    #[serde(skip)]
    pub(crate) client: Option<Client>,

    #[serde(rename = "Uri")]
    pub uri: String,

    #[serde(default, rename = "Name")]
    pub name: String,

    #[serde(default, rename = "FirstName")]
    pub first_name: String,

    #[serde(default, rename = "LastName")]
    pub last_name: String,

    #[serde(default, rename = "NickName")]
    pub nick_name: String,

    #[serde(default, rename = "Plan")]
    pub plan: String,

    #[serde(default, rename = "TimeZone")]
    pub time_zone: String,

    #[serde(default, rename = "WebUri")]
    pub web_uri: String,

    #[serde(default, rename = "Uris")]
    pub uris: UserUris,

    #[serde(skip)]
    pub node: Option<Box<Node>>,

    // Side-loaded with `_expand=UserAlbums`
    #[serde(skip)]
    pub albums: Option<Vec<Album>>,
}

impl User {
    /// Returns information for the user at the provided full url
    pub async fn from_url(
        client: Client,
        url: Url,
        options: &ApiOptions,
    ) -> Result<User, SmugMugError> {
        let user: Result<User, SmugMugError> =
            obj_from_url!(client, url, options, UserResponse, user);
        let mut user = user?;
        for album in user.albums.iter_mut().flatten() {
            album.client = user.client.clone();
        }
        Ok(user)
    }

    /// Returns information for the specified user nickname
    pub async fn from_id(
        client: Client,
        user_id: &str,
        options: &ApiOptions,
    ) -> Result<User, SmugMugError> {
        let req_url = client.endpoint(&format!("/api/v2/user/{}", user_id))?;
        Self::from_url(client, req_url, options).await
    }

    /// Returns information for the authenticated user
    pub async fn authenticated_user_info(
        client: Client,
        options: &ApiOptions,
    ) -> Result<User, SmugMugError> {
        let req_url = client.endpoint("/api/v2!authuser")?;
        Self::from_url(client, req_url, options).await
    }

    /// Root node of the user's hierarchy, from the expansion when one was loaded
    pub async fn root_node(&self, options: &ApiOptions) -> Result<Node, SmugMugError> {
        if let Some(node) = &self.node {
            return Ok(node.as_ref().clone());
        }
        let node_uri = self.uris.node.as_ref().ok_or(SmugMugError::ResponseMissing())?;
        let client = self
            .client
            .as_ref()
            .ok_or(SmugMugError::ClientNotFound())?
            .clone();
        let req_url = client.endpoint(node_uri)?;
        Node::from_url(client, req_url, options).await
    }

    /// Calls `visitor` for every album the user owns until it returns `Ok(false)`
    pub async fn albums_iter<V>(&self, options: &ApiOptions, visitor: V) -> Result<(), SmugMugError>
    where
        V: FnMut(Album) -> Result<bool, SmugMugError>,
    {
        let client = self.client.as_ref().ok_or(SmugMugError::ClientNotFound())?;
        Album::user_albums_iter(client, &self.nick_name, options, visitor).await
    }
}

impl Expandable for User {
    fn expand(&mut self, expansions: &Expansions) -> Result<(), SmugMugError> {
        if let Some(node) = side_loaded::<Node>(expansions, self.uris.node.as_deref(), "Node")? {
            self.node = Some(Box::new(node));
        }
        if let Some(albums) =
            side_loaded::<Vec<Album>>(expansions, self.uris.user_albums.as_deref(), "Album")?
        {
            self.albums = Some(albums);
        }
        Ok(())
    }
}

/// Uris returned for a User
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UserUris {
    #[serde(rename = "Node")]
    pub node: Option<String>,

    #[serde(rename = "UserAlbums")]
    pub user_albums: Option<String>,
}

// Expected response from a User request
#[derive(Deserialize, Debug)]
struct UserResponse {
    #[serde(rename = "User")]
    user: User,
}
