/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::SmugMugError;
use crate::v2::expansion::{Expandable, Expansions, side_loaded};
use crate::v2::macros::{obj_from_url, page_from_url};
use crate::v2::pagination::{NUM_TO_GET, PageRequest, iterate, paginate};
use crate::v2::parsers::{from_empty_str_to_none, from_privacy, is_none_or_empty_str};
use crate::v2::{ApiOptions, Client, Image, Node, Pages, PrivacyLevel, User};
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};
use url::Url;

/// Holds information returned from the Album API.
///
/// See [SmugMug API Docs](https://api.smugmug.com/api/v2/doc/reference/album.html) for more
/// details on the individual fields.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Album {
    #[serde(skip)]
    pub(crate) client: Option<Client>,

    #[serde(rename = "Uri")]
    pub uri: String,

    #[serde(default, rename = "AlbumKey")]
    pub album_key: String,

    #[serde(default, rename = "Name")]
    pub name: String,

    #[serde(
        default,
        rename = "Description",
        skip_serializing_if = "is_none_or_empty_str"
    )]
    pub description: Option<String>,

    #[serde(
        default,
        rename = "PasswordHint",
        skip_serializing_if = "is_none_or_empty_str"
    )]
    pub password_hint: Option<String>,

    #[serde(default, rename = "UrlName")]
    pub url_name: String,

    #[serde(default, rename = "UrlPath")]
    pub url_path: String,

    #[serde(default, rename = "WebUri")]
    pub web_uri: String,

    #[serde(
        default,
        rename = "UploadKey",
        deserialize_with = "from_empty_str_to_none",
        skip_serializing_if = "is_none_or_empty_str"
    )]
    pub upload_key: Option<String>,

    #[serde(default, rename = "ImageCount")]
    pub image_count: u64,

    #[serde(
        default,
        rename = "Privacy",
        deserialize_with = "from_privacy",
        skip_serializing_if = "Option::is_none"
    )]
    pub privacy: Option<PrivacyLevel>,

    #[serde(default, rename = "NodeID")]
    pub node_id: String,

    #[serde(default, rename = "Date")]
    pub date_created: Option<DateTime<Utc>>,

    #[serde(default, rename = "ImagesLastUpdated")]
    pub images_last_updated: Option<DateTime<Utc>>,

    #[serde(default, rename = "LastUpdated")]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing, rename = "Uris")]
    pub uris: AlbumUris,

    #[serde(skip)]
    pub user: Option<Box<User>>,

    #[serde(skip)]
    pub highlight_image: Option<Box<Image>>,

    #[serde(skip)]
    pub node: Option<Box<Node>>,
}

impl Album {
    const BASE_URI: &'static str = "/api/v2/album/";

    /// Returns information for the album at the provided full url
    pub async fn from_url(
        client: Client,
        url: Url,
        options: &ApiOptions,
    ) -> Result<Self, SmugMugError> {
        obj_from_url!(client, url, options, AlbumResponse, album)
    }

    /// Returns information for the specified album key
    pub async fn from_id(
        client: Client,
        album_key: &str,
        options: &ApiOptions,
    ) -> Result<Self, SmugMugError> {
        let req_url = client.endpoint(&Self::uri_for(album_key))?;
        Self::from_url(client, req_url, options).await
    }

    /// Api path of the album with the given key
    pub fn uri_for(album_key: &str) -> String {
        format!("{}{}", Self::BASE_URI, album_key)
    }

    /// Fetches one page of albums from an album collection url
    pub async fn page(
        client: &Client,
        url: Url,
        options: &ApiOptions,
        request: PageRequest,
    ) -> Result<(Vec<Album>, Pages), SmugMugError> {
        page_from_url!(client, url, options, request, AlbumsResponse, albums)
    }

    /// Calls `visitor` for every image in the album until it returns `Ok(false)`
    pub async fn images_iter<V>(
        client: &Client,
        album_key: &str,
        options: &ApiOptions,
        visitor: V,
    ) -> Result<(), SmugMugError>
    where
        V: FnMut(Image) -> Result<bool, SmugMugError>,
    {
        let url = client.endpoint(&format!("{}{}!images", Self::BASE_URI, album_key))?;
        iterate(
            |request| Image::page(client, url.clone(), options, request),
            visitor,
            NUM_TO_GET,
        )
        .await
    }

    /// Calls `visitor` for every album owned by the user until it returns `Ok(false)`
    pub async fn user_albums_iter<V>(
        client: &Client,
        nick_name: &str,
        options: &ApiOptions,
        visitor: V,
    ) -> Result<(), SmugMugError>
    where
        V: FnMut(Album) -> Result<bool, SmugMugError>,
    {
        let url = client.endpoint(&format!("/api/v2/user/{}!albums", nick_name))?;
        iterate(
            |request| Self::page(client, url.clone(), options, request),
            visitor,
            NUM_TO_GET,
        )
        .await
    }

    /// Fetches one page of album search results. Search terms come from [`ApiOptions::with_search`].
    pub async fn search_page(
        client: &Client,
        options: &ApiOptions,
        request: PageRequest,
    ) -> Result<(Vec<Album>, Pages), SmugMugError> {
        let url = client.endpoint("/api/v2/album!search")?;
        Self::page(client, url, options, request).await
    }

    // Results can be very large depending on the scope
    pub async fn search_iter<V>(
        client: &Client,
        options: &ApiOptions,
        visitor: V,
    ) -> Result<(), SmugMugError>
    where
        V: FnMut(Album) -> Result<bool, SmugMugError>,
    {
        iterate(
            |request| Self::search_page(client, options, request),
            visitor,
            NUM_TO_GET,
        )
        .await
    }

    /// Retrieves information about the images associated with this Album
    pub fn images(
        &self,
        options: ApiOptions,
    ) -> Result<impl Stream<Item = Result<Image, SmugMugError>>, SmugMugError> {
        let client = self
            .client
            .as_ref()
            .ok_or(SmugMugError::ClientNotFound())?
            .clone();
        let images_uri = self
            .uris
            .album_images
            .clone()
            .unwrap_or_else(|| format!("{}{}!images", Self::BASE_URI, self.album_key));
        let url = client.endpoint(&images_uri)?;
        Ok(paginate(
            move |request| {
                let client = client.clone();
                let url = url.clone();
                let options = options.clone();
                async move { Image::page(&client, url, &options, request).await }
            },
            NUM_TO_GET,
        ))
    }
}

impl Expandable for Album {
    fn expand(&mut self, expansions: &Expansions) -> Result<(), SmugMugError> {
        if let Some(user) = side_loaded::<User>(expansions, self.uris.user.as_deref(), "User")? {
            self.user = Some(Box::new(user));
        }
        if let Some(image) =
            side_loaded::<Image>(expansions, self.uris.highlight_image.as_deref(), "Image")?
        {
            self.highlight_image = Some(Box::new(image));
        }
        if let Some(node) = side_loaded::<Node>(expansions, self.uris.node.as_deref(), "Node")? {
            self.node = Some(Box::new(node));
        }
        Ok(())
    }
}

impl std::fmt::Display for Album {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "name: {}, key: {}", self.name, self.album_key)
    }
}

/// Uris returned for an Album
#[derive(Deserialize, Debug, Clone, Default)]
pub struct AlbumUris {
    #[serde(rename = "AlbumImages")]
    pub album_images: Option<String>,

    #[serde(rename = "User")]
    pub user: Option<String>,

    #[serde(rename = "Node")]
    pub node: Option<String>,

    #[serde(rename = "HighlightImage")]
    pub highlight_image: Option<String>,
}

// Expected response from an Album request
#[derive(Deserialize, Debug)]
struct AlbumResponse {
    #[serde(rename = "Album")]
    album: Album,
}

// Expected response from a user albums request
#[derive(Deserialize, Debug)]
struct AlbumsResponse {
    #[serde(default, rename = "Album")]
    albums: Vec<Album>,

    #[serde(rename = "Pages")]
    pages: Option<Pages>,
}
