/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::PrivacyLevel;
use crate::v2::parsers::from_privacy;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Folder details side-loaded onto a folder [`Node`](crate::v2::Node)
#[derive(Deserialize, Clone, Debug)]
pub struct Folder {
    #[serde(rename = "Uri")]
    pub uri: String,

    #[serde(default, rename = "Name")]
    pub name: String,

    #[serde(default, rename = "Description")]
    pub description: String,

    #[serde(default, rename = "UrlName")]
    pub url_name: String,

    #[serde(default, rename = "UrlPath")]
    pub url_path: String,

    #[serde(default, rename = "NodeID")]
    pub node_id: String,

    #[serde(default, rename = "Privacy", deserialize_with = "from_privacy")]
    pub privacy: Option<PrivacyLevel>,

    #[serde(default, rename = "DateAdded")]
    pub date_created: Option<DateTime<Utc>>,

    #[serde(default, rename = "DateModified")]
    pub date_modified: Option<DateTime<Utc>>,
}
