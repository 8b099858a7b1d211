/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

use helpers::{envelope, mock_client, node_json, pages_json};
use serde_json::{Value, json};
use smugmug_client::v2::{ApiOptions, SmugMugError, walk, walk_to_depth};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_node(server: &MockServer, node: Value, hits: u64) {
    let id = node["NodeID"].as_str().unwrap().to_string();
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/node/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({ "Node": node }))))
        .expect(hits)
        .mount(server)
        .await;
}

async fn mount_children(server: &MockServer, id: &str, children: Vec<Value>, hits: u64) {
    let total = children.len() as u64;
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/node/{}!children", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "Node": children,
            "Pages": pages_json(total, 1, total),
        }))))
        .expect(hits)
        .mount(server)
        .await;
}

// root
// ├── A (folder)
// │   ├── A1 (album)
// │   └── A2 (album)
// └── B (album)
async fn mount_tree(server: &MockServer, a_children_hits: u64) {
    mount_node(server, node_json("root", "Folder", true), 1).await;
    mount_children(
        server,
        "root",
        vec![node_json("A", "Folder", true), node_json("B", "Album", false)],
        1,
    )
    .await;
    mount_children(
        server,
        "A",
        vec![node_json("A1", "Album", false), node_json("A2", "Album", false)],
        a_children_hits,
    )
    .await;
}

#[tokio::test]
async fn visits_depth_first_with_parents_first() {
    let server = MockServer::start().await;
    mount_tree(&server, 1).await;

    let client = mock_client(&server);
    let mut visited = Vec::new();
    walk(&client, "root", &ApiOptions::default(), |node| {
        visited.push(node.node_id.clone());
        Ok(true)
    })
    .await
    .unwrap();

    // Children come off a stack, so the last listed child is visited first
    assert_eq!(visited, vec!["root", "B", "A", "A2", "A1"]);
}

#[tokio::test]
async fn folder_without_children_is_not_listed() {
    let server = MockServer::start().await;
    mount_node(&server, node_json("root", "Folder", true), 1).await;
    mount_children(
        &server,
        "root",
        vec![
            node_json("empty", "Folder", false),
            node_json("album", "Album", false),
        ],
        1,
    )
    .await;
    mount_children(&server, "empty", vec![], 0).await;

    let client = mock_client(&server);
    let mut visited = Vec::new();
    walk(&client, "root", &ApiOptions::default(), |node| {
        visited.push(node.node_id.clone());
        Ok(true)
    })
    .await
    .unwrap();

    visited.sort();
    assert_eq!(visited, vec!["album", "empty", "root"]);
}

#[tokio::test]
async fn depth_limit_stops_listing() {
    let server = MockServer::start().await;
    mount_tree(&server, 0).await;

    let client = mock_client(&server);
    let mut visited = Vec::new();
    walk_to_depth(&client, "root", 1, &ApiOptions::default(), |node| {
        visited.push(node.node_id.clone());
        Ok(true)
    })
    .await
    .unwrap();
    assert_eq!(visited, vec!["root", "B", "A"]);
}

#[tokio::test]
async fn depth_zero_visits_only_the_start() {
    let server = MockServer::start().await;
    mount_node(&server, node_json("root", "Folder", true), 1).await;
    mount_children(&server, "root", vec![], 0).await;

    let client = mock_client(&server);
    let mut visited = Vec::new();
    walk_to_depth(&client, "root", 0, &ApiOptions::default(), |node| {
        visited.push(node.node_id.clone());
        Ok(true)
    })
    .await
    .unwrap();
    assert_eq!(visited, vec!["root"]);
}

#[tokio::test]
async fn unsupported_node_type_ends_walk() {
    let server = MockServer::start().await;
    mount_node(&server, node_json("root", "Folder", true), 1).await;
    mount_children(
        &server,
        "root",
        vec![node_json("album", "Album", false), node_json("page", "Page", false)],
        1,
    )
    .await;

    let client = mock_client(&server);
    let mut visited = Vec::new();
    let err = walk(&client, "root", &ApiOptions::default(), |node| {
        visited.push(node.node_id.clone());
        Ok(true)
    })
    .await
    .unwrap_err();

    assert!(matches!(err, SmugMugError::UnsupportedNodeType(ref kind) if kind == "Page"));
    // The page is seen by the visitor before the walk gives up on it
    assert_eq!(visited, vec!["root", "page"]);
}

#[tokio::test]
async fn visitor_can_stop_the_walk() {
    let server = MockServer::start().await;
    mount_tree(&server, 0).await;

    let client = mock_client(&server);
    let mut visited = Vec::new();
    walk(&client, "root", &ApiOptions::default(), |node| {
        visited.push(node.node_id.clone());
        Ok(node.node_id != "B")
    })
    .await
    .unwrap();
    assert_eq!(visited, vec!["root", "B"]);
}

#[tokio::test]
async fn visitor_error_is_returned() {
    let server = MockServer::start().await;
    mount_node(&server, node_json("root", "Folder", true), 1).await;
    mount_children(&server, "root", vec![], 0).await;

    let client = mock_client(&server);
    let err = walk(&client, "root", &ApiOptions::default(), |_| {
        Err(SmugMugError::NotAnAlbum())
    })
    .await
    .unwrap_err();
    assert!(matches!(err, SmugMugError::NotAnAlbum()));
}

#[tokio::test]
async fn album_start_is_visited_alone() {
    let server = MockServer::start().await;
    mount_node(&server, node_json("solo", "Album", false), 1).await;

    let client = mock_client(&server);
    let mut visited = 0;
    walk(&client, "solo", &ApiOptions::default(), |_| {
        visited += 1;
        Ok(true)
    })
    .await
    .unwrap();
    assert_eq!(visited, 1);
}

#[tokio::test]
async fn system_albums_are_leaves() {
    let server = MockServer::start().await;
    mount_node(&server, node_json("root", "Folder", true), 1).await;
    // HasChildren is set, but albums are never listed
    mount_children(
        &server,
        "root",
        vec![node_json("S", "System Album", true)],
        1,
    )
    .await;
    mount_children(&server, "S", vec![], 0).await;

    let client = mock_client(&server);
    let mut visited = Vec::new();
    walk(&client, "root", &ApiOptions::default(), |node| {
        visited.push(node.node_id.clone());
        Ok(true)
    })
    .await
    .unwrap();
    assert_eq!(visited, vec!["root", "S"]);
}
