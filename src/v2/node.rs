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
use crate::v2::parsers::{
    default_true, from_node_type, from_privacy, is_none_or_empty_str, to_node_type,
};
use crate::v2::{Album, ApiOptions, Client, Folder, Image, NodeType, Pages, PrivacyLevel, User};
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use url::Url;

/// Holds information returned from the Node API.
///
/// See [SmugMug API Docs](https://api.smugmug.com/api/v2/doc/reference/node.html) for more
/// details on the individual fields.
///
/// The relation fields (`user`, `parent`, `album`, ...) are only filled in when
/// the request asked for them with [`ApiOptions::with_expansions`].
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Node {
    #[serde(skip)]
    pub(crate) client: Option<Client>,

    #[serde(rename = "Uri")]
    pub uri: String,

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
        rename = "Privacy",
        deserialize_with = "from_privacy",
        skip_serializing_if = "Option::is_none"
    )]
    pub privacy: Option<PrivacyLevel>,

    // Folders report whether they hold anything; assume they do when not told
    #[serde(default = "default_true", rename = "HasChildren")]
    pub has_children: bool,

    #[serde(default, rename = "IsRoot")]
    pub is_root: bool,

    #[serde(rename = "NodeID")]
    pub node_id: String,

    #[serde(
        rename = "Type",
        deserialize_with = "from_node_type",
        serialize_with = "to_node_type"
    )]
    pub node_type: NodeType,

    #[serde(default, rename = "DateAdded")]
    pub date_created: Option<DateTime<Utc>>,

    #[serde(default, rename = "DateModified")]
    pub date_modified: Option<DateTime<Utc>>,

    #[serde(default, rename = "Uris")]
    pub uris: NodeUris,

    #[serde(skip)]
    pub user: Option<Box<User>>,

    #[serde(skip)]
    pub highlight_image: Option<Box<Image>>,

    #[serde(skip)]
    pub parent: Option<Box<Node>>,

    // Only for album nodes
    #[serde(skip)]
    pub album: Option<Box<Album>>,

    // Only for folder nodes
    #[serde(skip)]
    pub folder: Option<Box<Folder>>,
}

impl Node {
    const BASE_URI: &'static str = "/api/v2/node/";

    /// Returns information for the node at the provided full url
    pub async fn from_url(
        client: Client,
        url: Url,
        options: &ApiOptions,
    ) -> Result<Self, SmugMugError> {
        obj_from_url!(client, url, options, NodeResponse, node)
    }

    /// Returns information for the specified node id using the provided client
    pub async fn from_id(
        client: Client,
        id: &str,
        options: &ApiOptions,
    ) -> Result<Self, SmugMugError> {
        let req_url = client.endpoint(&format!("{}{}", Self::BASE_URI, id))?;
        Self::from_url(client, req_url, options).await
    }

    /// Returns the direct parent of the specified node
    pub async fn parent(
        client: Client,
        id: &str,
        options: &ApiOptions,
    ) -> Result<Self, SmugMugError> {
        let req_url = client.endpoint(&format!("{}{}!parent", Self::BASE_URI, id))?;
        Self::from_url(client, req_url, options).await
    }

    /// Uri listing the children of the node with the given id
    pub fn children_uri_for(id: &str) -> String {
        format!("{}{}!children", Self::BASE_URI, id)
    }

    /// Uri listing the chain of parents of the node with the given id
    pub fn parents_uri_for(id: &str) -> String {
        format!("{}{}!parents", Self::BASE_URI, id)
    }

    /// Fetches one page of nodes from a node collection url
    pub async fn page(
        client: &Client,
        url: Url,
        options: &ApiOptions,
        request: PageRequest,
    ) -> Result<(Vec<Node>, Pages), SmugMugError> {
        page_from_url!(client, url, options, request, NodesResponse, nodes)
    }

    /// Fetches one page of node search results. Search terms come from [`ApiOptions::with_search`].
    pub async fn search_page(
        client: &Client,
        options: &ApiOptions,
        request: PageRequest,
    ) -> Result<(Vec<Node>, Pages), SmugMugError> {
        let url = client.endpoint("/api/v2/node!search")?;
        Self::page(client, url, options, request).await
    }

    /// Calls `visitor` for every node matching the search until it returns `Ok(false)`
    pub async fn search_iter<V>(
        client: &Client,
        options: &ApiOptions,
        visitor: V,
    ) -> Result<(), SmugMugError>
    where
        V: FnMut(Node) -> Result<bool, SmugMugError>,
    {
        iterate(
            |request| Self::search_page(client, options, request),
            visitor,
            NUM_TO_GET,
        )
        .await
    }

    /// Calls `visitor` for every child of the node, in server order, until it returns `Ok(false)`
    pub async fn children_iter<V>(
        client: &Client,
        id: &str,
        options: &ApiOptions,
        visitor: V,
    ) -> Result<(), SmugMugError>
    where
        V: FnMut(Node) -> Result<bool, SmugMugError>,
    {
        let url = client.endpoint(&Self::children_uri_for(id))?;
        iterate(
            |request| Self::page(client, url.clone(), options, request),
            visitor,
            NUM_TO_GET,
        )
        .await
    }

    /// Calls `visitor` for every parent of the node until it returns `Ok(false)`
    pub async fn parents_iter<V>(
        client: &Client,
        id: &str,
        options: &ApiOptions,
        visitor: V,
    ) -> Result<(), SmugMugError>
    where
        V: FnMut(Node) -> Result<bool, SmugMugError>,
    {
        let url = client.endpoint(&Self::parents_uri_for(id))?;
        iterate(
            |request| Self::page(client, url.clone(), options, request),
            visitor,
            NUM_TO_GET,
        )
        .await
    }

    /// Retrieves the child nodes of this node
    pub fn children(
        &self,
        options: ApiOptions,
    ) -> Result<impl Stream<Item = Result<Node, SmugMugError>>, SmugMugError> {
        let client = self
            .client
            .as_ref()
            .ok_or(SmugMugError::ClientNotFound())?
            .clone();
        self.children_with_client(client, options)
    }

    /// Retrieves the child nodes of this node using the provided client
    pub fn children_with_client(
        &self,
        client: Client,
        options: ApiOptions,
    ) -> Result<impl Stream<Item = Result<Node, SmugMugError>>, SmugMugError> {
        let children_uri = self
            .uris
            .child_nodes
            .clone()
            .unwrap_or_else(|| Self::children_uri_for(&self.node_id));
        let url = client.endpoint(&children_uri)?;
        Ok(paginate(
            move |request| {
                let client = client.clone();
                let url = url.clone();
                let options = options.clone();
                async move { Self::page(&client, url, &options, request).await }
            },
            NUM_TO_GET,
        ))
    }

    /// Retrieves the Album specific information about this Node
    pub async fn album_details(&self, options: &ApiOptions) -> Result<Album, SmugMugError> {
        let album_uri = self.uris.album.as_ref().ok_or(SmugMugError::NotAnAlbum())?;
        let client = self
            .client
            .as_ref()
            .ok_or(SmugMugError::ClientNotFound())?
            .clone();
        let req_url = client.endpoint(album_uri)?;
        Album::from_url(client, req_url, options).await
    }

    /// Retrieves the album key if this node is an [`Album`] type
    pub fn album_key(&self) -> Result<String, SmugMugError> {
        let album_uri = self.uris.album.as_ref().ok_or(SmugMugError::NotAnAlbum())?;
        album_uri
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or(SmugMugError::NotAnAlbum())
    }
}

impl Expandable for Node {
    fn expand(&mut self, expansions: &Expansions) -> Result<(), SmugMugError> {
        if let Some(user) = side_loaded::<User>(expansions, self.uris.user.as_deref(), "User")? {
            self.user = Some(Box::new(user));
        }
        if let Some(image) =
            side_loaded::<Image>(expansions, self.uris.highlight_image.as_deref(), "Image")?
        {
            self.highlight_image = Some(Box::new(image));
        }
        if let Some(parent) =
            side_loaded::<Node>(expansions, self.uris.parent_node.as_deref(), "Node")?
        {
            self.parent = Some(Box::new(parent));
        }

        match self.node_type {
            NodeType::Album | NodeType::SystemAlbum => {
                if let Some(album) =
                    side_loaded::<Album>(expansions, self.uris.album.as_deref(), "Album")?
                {
                    self.album = Some(Box::new(album));
                }
            }
            NodeType::Folder => {
                if let Some(folder) =
                    side_loaded::<Folder>(expansions, self.uris.folder.as_deref(), "Folder")?
                {
                    self.folder = Some(Box::new(folder));
                }
            }
            NodeType::Page
            | NodeType::SystemFolder
            | NodeType::SystemPage
            | NodeType::Unknown(_) => {}
        }
        Ok(())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.node_id == other.node_id
    }
}
impl Eq for Node {}

impl Hash for Node {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.node_id.hash(state);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node_id.cmp(&other.node_id)
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "name: {}, id: {}, type: {}",
            self.name, self.node_id, self.node_type
        )
    }
}

/// Uris returned for a Node
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct NodeUris {
    #[serde(rename = "ChildNodes", skip_serializing_if = "Option::is_none")]
    pub child_nodes: Option<String>,

    #[serde(rename = "ParentNode", skip_serializing_if = "Option::is_none")]
    pub parent_node: Option<String>,

    #[serde(rename = "ParentNodes", skip_serializing_if = "Option::is_none")]
    pub parent_nodes: Option<String>,

    #[serde(rename = "User", skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(rename = "HighlightImage", skip_serializing_if = "Option::is_none")]
    pub highlight_image: Option<String>,

    // Only present if node is an album type
    #[serde(rename = "Album", skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    // Only present if node is a folder type
    #[serde(rename = "FolderByID", alias = "Folder", skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

// Expected response from a Node request
#[derive(Deserialize, Debug)]
struct NodeResponse {
    #[serde(rename = "Node")]
    node: Node,
}

// Expected response from a Node Children request
#[derive(Deserialize, Debug)]
struct NodesResponse {
    #[serde(default, rename = "Node")]
    nodes: Vec<Node>,

    #[serde(rename = "Pages")]
    pages: Option<Pages>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::value::RawValue;

    fn folder_json() -> &'static str {
        r#"{
            "Uri": "/api/v2/node/f1",
            "Name": "Trips",
            "NodeID": "f1",
            "Type": "Folder",
            "HasChildren": true,
            "Uris": {
                "ChildNodes": "/api/v2/node/f1!children",
                "ParentNode": "/api/v2/node/root",
                "User": "/api/v2/user/cmac",
                "FolderByID": "/api/v2/folder/id/f1"
            }
        }"#
    }

    fn expansions(entries: &[(&str, &str)]) -> Expansions {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), RawValue::from_string(v.to_string()).unwrap()))
            .collect()
    }

    #[test]
    fn decodes_lenient_node() {
        let node: Node = serde_json::from_str(
            r#"{"Uri": "/api/v2/node/a", "NodeID": "a", "Type": "Album"}"#,
        )
        .unwrap();
        assert_eq!(node.node_type, NodeType::Album);
        assert!(node.has_children);
        assert!(node.uris.child_nodes.is_none());
        assert!(node.date_created.is_none());
    }

    #[test]
    fn expands_shared_and_folder_relations() {
        let mut node: Node = serde_json::from_str(folder_json()).unwrap();
        let exp = expansions(&[
            ("/api/v2/user/cmac", r#"{"User": {"Uri": "/api/v2/user/cmac", "Name": "Craig", "NickName": "cmac"}}"#),
            ("/api/v2/node/root", r#"{"Node": {"Uri": "/api/v2/node/root", "NodeID": "root", "Type": "Folder", "IsRoot": true}}"#),
            ("/api/v2/folder/id/f1", r#"{"Folder": {"Uri": "/api/v2/folder/user/cmac/Trips", "Name": "Trips"}}"#),
        ]);
        node.expand(&exp).unwrap();
        assert_eq!(node.user.as_ref().unwrap().nick_name, "cmac");
        assert_eq!(node.parent.as_ref().unwrap().node_id, "root");
        assert_eq!(node.folder.as_ref().unwrap().name, "Trips");
        assert!(node.album.is_none());
        assert!(node.highlight_image.is_none());

        // Same expansions again give the same result
        node.expand(&exp).unwrap();
        assert_eq!(node.parent.as_ref().unwrap().node_id, "root");
    }

    #[test]
    fn album_relation_ignored_for_folders() {
        let mut node: Node = serde_json::from_str(
            r#"{"Uri": "/api/v2/node/f1", "NodeID": "f1", "Type": "Folder",
                "Uris": {"Album": "/api/v2/album/k1"}}"#,
        )
        .unwrap();
        let exp = expansions(&[(
            "/api/v2/album/k1",
            r#"{"Album": {"Uri": "/api/v2/album/k1", "AlbumKey": "k1", "Name": "x"}}"#,
        )]);
        node.expand(&exp).unwrap();
        assert!(node.album.is_none());
    }

    #[test]
    fn album_key_from_uri() {
        let node: Node = serde_json::from_str(
            r#"{"Uri": "/api/v2/node/a", "NodeID": "a", "Type": "Album",
                "Uris": {"Album": "/api/v2/album/SJT3DX"}}"#,
        )
        .unwrap();
        assert_eq!(node.album_key().unwrap(), "SJT3DX");

        let node: Node = serde_json::from_str(folder_json()).unwrap();
        assert!(matches!(node.album_key(), Err(SmugMugError::NotAnAlbum())));
    }
}
