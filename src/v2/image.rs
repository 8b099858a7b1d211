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
use crate::v2::pagination::PageRequest;
use crate::v2::{Album, ApiOptions, Client, Pages};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

/// Holds information returned from the AlbumImage/Image API.
///
/// See [SmugMug API Docs](https://api.smugmug.com/api/v2/doc/reference/image.html) for more
/// details on the individual fields.
#[derive(Deserialize, Clone, Debug)]
pub struct Image {
    #[serde(skip)]
    pub(crate) client: Option<Client>,

    #[serde(rename = "Uri")]
    pub uri: String,

    #[serde(default, rename = "ImageKey")]
    pub image_key: String,

    #[serde(default, rename = "Title")]
    pub name: String,

    #[serde(default, rename = "Caption")]
    pub description: String,

    #[serde(default, rename = "Altitude")]
    pub altitude: u64,

    #[serde(default, rename = "Latitude")]
    pub latitude: String,

    #[serde(default, rename = "Longitude")]
    pub longitude: String,

    #[serde(default, rename = "Format")]
    pub format: String,

    #[serde(default, rename = "FileName")]
    pub file_name: String,

    #[serde(default, rename = "KeywordArray")]
    pub keywords: Vec<String>,

    #[serde(default, rename = "ArchivedUri")]
    pub archived_uri: Option<String>,

    #[serde(default, rename = "ArchivedMD5")]
    pub archived_md5: Option<String>,

    #[serde(default, rename = "ArchivedSize")]
    pub archived_size: Option<u64>,

    #[serde(default, rename = "Processing")]
    pub is_processing: bool,

    #[serde(default, rename = "IsVideo")]
    pub is_video: bool,

    #[serde(default, rename = "Hidden")]
    pub is_hidden: bool,

    #[serde(default, rename = "Watermarked")]
    pub is_watermarked: bool,

    #[serde(default, rename = "DateTimeUploaded")]
    pub date_created: Option<DateTime<Utc>>,

    #[serde(default, rename = "LastUpdated")]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default, rename = "Uris")]
    pub uris: ImageUris,

    #[serde(skip)]
    pub album: Option<Box<Album>>,

    #[serde(skip)]
    pub size_details: Option<Box<ImageSizeDetails>>,
}

impl Image {
    const BASE_URI: &'static str = "/api/v2/image/";

    /// Returns information for the image at the provided full url
    pub async fn from_url(
        client: Client,
        url: Url,
        options: &ApiOptions,
    ) -> Result<Self, SmugMugError> {
        obj_from_url!(client, url, options, ImageResponse, image)
    }

    /// Returns information for the specified image key
    pub async fn from_id(
        client: Client,
        image_key: &str,
        options: &ApiOptions,
    ) -> Result<Self, SmugMugError> {
        let req_url = client.endpoint(&format!("{}{}", Self::BASE_URI, image_key))?;
        Self::from_url(client, req_url, options).await
    }

    /// Fetches one page of images from an image collection url
    pub async fn page(
        client: &Client,
        url: Url,
        options: &ApiOptions,
        request: PageRequest,
    ) -> Result<(Vec<Image>, Pages), SmugMugError> {
        page_from_url!(client, url, options, request, ImagesResponse, images)
    }

    /// Where the image itself lives. Album image listings carry it in `Uris`,
    /// their own `uri` names the album image instead.
    pub fn image_uri(&self) -> Option<&str> {
        self.uris.image.as_deref()
    }
}

impl Expandable for Image {
    fn expand(&mut self, expansions: &Expansions) -> Result<(), SmugMugError> {
        if let Some(details) = side_loaded::<ImageSizeDetails>(
            expansions,
            self.uris.image_size_details.as_deref(),
            "ImageSizeDetails",
        )? {
            self.size_details = Some(Box::new(details));
        }

        // An album image names its album directly, a plain image only through ImageAlbum
        let album_uri = self
            .uris
            .album
            .as_deref()
            .or(self.uris.image_album.as_deref());
        if let Some(album) = side_loaded::<Album>(expansions, album_uri, "Album")? {
            self.album = Some(Box::new(album));
        }
        Ok(())
    }
}

impl std::fmt::Display for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "file: {}, key: {}", self.file_name, self.image_key)
    }
}

/// Uris returned for an Image
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ImageUris {
    #[serde(rename = "Image")]
    pub image: Option<String>,

    #[serde(rename = "Album")]
    pub album: Option<String>,

    #[serde(rename = "ImageAlbum")]
    pub image_album: Option<String>,

    #[serde(rename = "ImageSizeDetails")]
    pub image_size_details: Option<String>,
}

/// One rendition of an image
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ImageSize {
    #[serde(default, rename = "Url")]
    pub url: String,

    #[serde(default, rename = "Ext")]
    pub ext: String,

    #[serde(default, rename = "Height")]
    pub height: u32,

    #[serde(default, rename = "Width")]
    pub width: u32,

    #[serde(default, rename = "Size")]
    pub size: u64,
}

/// Renditions the service keeps for an image, side-loaded with `_expand=ImageSizeDetails`
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ImageSizeDetails {
    #[serde(default, rename = "ImageSizeTiny")]
    pub tiny: Option<ImageSize>,

    #[serde(default, rename = "ImageSizeThumb")]
    pub thumb: Option<ImageSize>,

    #[serde(default, rename = "ImageSizeSmall")]
    pub small: Option<ImageSize>,

    #[serde(default, rename = "ImageSizeMedium")]
    pub medium: Option<ImageSize>,

    #[serde(default, rename = "ImageSizeLarge")]
    pub large: Option<ImageSize>,

    #[serde(default, rename = "ImageSizeXLarge")]
    pub x_large: Option<ImageSize>,

    #[serde(default, rename = "ImageSizeX2Large")]
    pub x2_large: Option<ImageSize>,

    #[serde(default, rename = "ImageSizeX3Large")]
    pub x3_large: Option<ImageSize>,

    #[serde(default, rename = "ImageSizeOriginal")]
    pub original: Option<ImageSize>,

    #[serde(default, rename = "ImageUrlTemplate")]
    pub url_template: String,

    #[serde(default, rename = "UsableSizes")]
    pub usable_sizes: Vec<String>,
}

// Expected response for a request to get an Image
#[derive(Deserialize, Debug)]
struct ImageResponse {
    #[serde(rename = "Image")]
    image: Image,
}

// Expected response for album image listings
#[derive(Deserialize, Debug)]
struct ImagesResponse {
    #[serde(default, rename = "AlbumImage")]
    images: Vec<Image>,

    #[serde(rename = "Pages")]
    pages: Option<Pages>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::value::RawValue;

    fn album_exp(uri: &str) -> Expansions {
        [(
            uri.to_string(),
            RawValue::from_string(
                r#"{"Album": {"Uri": "/api/v2/album/k1", "AlbumKey": "k1", "Name": "Beach"}}"#
                    .into(),
            )
            .unwrap(),
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn album_uri_preferred_over_image_album() {
        let mut image: Image = serde_json::from_str(
            r#"{"Uri": "/api/v2/album/k1/image/i1-0", "FileName": "a.jpg",
                "Uris": {"Album": "/api/v2/album/k1", "ImageAlbum": "/api/v2/album/other",
                         "Image": "/api/v2/image/i1-0"}}"#,
        )
        .unwrap();
        image.expand(&album_exp("/api/v2/album/other")).unwrap();
        assert!(image.album.is_none());

        image.expand(&album_exp("/api/v2/album/k1")).unwrap();
        assert_eq!(image.album.as_ref().unwrap().album_key, "k1");
        assert_eq!(image.image_uri(), Some("/api/v2/image/i1-0"));
    }

    #[test]
    fn size_details_are_side_loaded() {
        let mut image: Image = serde_json::from_str(
            r#"{"Uri": "/api/v2/image/i1-0", "FileName": "a.jpg",
                "Uris": {"ImageSizeDetails": "/api/v2/image/i1-0!sizedetails"}}"#,
        )
        .unwrap();
        let exp: Expansions = [(
            "/api/v2/image/i1-0!sizedetails".to_string(),
            RawValue::from_string(
                r#"{"ImageSizeDetails": {
                    "ImageSizeThumb": {"Url": "https://photos.smugmug.com/Th/a.jpg", "Ext": "jpg", "Width": 150, "Height": 100},
                    "ImageSizeOriginal": {"Url": "https://photos.smugmug.com/O/a.jpg", "Ext": "jpg", "Width": 6000, "Height": 4000, "Size": 8123456},
                    "UsableSizes": ["ImageSizeThumb", "ImageSizeOriginal"]}}"#
                    .into(),
            )
            .unwrap(),
        )]
        .into_iter()
        .collect();

        image.expand(&exp).unwrap();
        let details = image.size_details.as_ref().unwrap();
        assert_eq!(details.thumb.as_ref().unwrap().width, 150);
        let original = details.original.as_ref().unwrap();
        assert_eq!(original.size, 8123456);
        assert_eq!(original.url, "https://photos.smugmug.com/O/a.jpg");
        assert!(details.large.is_none());
        assert_eq!(details.usable_sizes.len(), 2);
        assert!(image.album.is_none());
    }

    #[test]
    fn falls_back_to_image_album() {
        let mut image: Image = serde_json::from_str(
            r#"{"Uri": "/api/v2/image/i1-0", "FileName": "a.jpg",
                "Uris": {"ImageAlbum": "/api/v2/album/k1"}}"#,
        )
        .unwrap();
        image.expand(&album_exp("/api/v2/album/k1")).unwrap();
        assert_eq!(image.album.as_ref().unwrap().name, "Beach");
        assert!(image.image_uri().is_none());
    }
}
