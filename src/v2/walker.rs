/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Depth-first traversal of the folder/album hierarchy.
//!
//! Nodes waiting to be visited sit on an explicit stack so deep trees never
//! grow the call stack. Children found while listing a folder are pushed with
//! their data, so only the starting node is fetched on its own.

use crate::v2::errors::SmugMugError;
use crate::v2::{ApiOptions, Client, Node, NodeType};
use log::{debug, info};

// A node waiting to be visited. `node` is set when it came from a listing.
struct Pending {
    id: String,
    node: Option<Node>,
    depth: usize,
}

/// Visits the node with `node_id` and everything below it.
///
/// `visitor` sees each node exactly once, parents before children. Returning
/// `Ok(false)` stops the walk without error; returning an error stops it with
/// that error. Node types other than albums and folders end the walk with
/// [`SmugMugError::UnsupportedNodeType`].
pub async fn walk<V>(
    client: &Client,
    node_id: &str,
    options: &ApiOptions,
    visitor: V,
) -> Result<(), SmugMugError>
where
    V: FnMut(&Node) -> Result<bool, SmugMugError>,
{
    walk_nodes(client, node_id, None, options, visitor).await
}

/// Same as [`walk`] but folders at `max_depth` are visited without listing their children.
///
/// The starting node is depth zero, so a `max_depth` of zero visits only that node.
pub async fn walk_to_depth<V>(
    client: &Client,
    node_id: &str,
    max_depth: usize,
    options: &ApiOptions,
    visitor: V,
) -> Result<(), SmugMugError>
where
    V: FnMut(&Node) -> Result<bool, SmugMugError>,
{
    walk_nodes(client, node_id, Some(max_depth), options, visitor).await
}

async fn walk_nodes<V>(
    client: &Client,
    node_id: &str,
    max_depth: Option<usize>,
    options: &ApiOptions,
    mut visitor: V,
) -> Result<(), SmugMugError>
where
    V: FnMut(&Node) -> Result<bool, SmugMugError>,
{
    let mut stack = vec![Pending {
        id: node_id.to_string(),
        node: None,
        depth: 0,
    }];

    while let Some(pending) = stack.pop() {
        let node = match pending.node {
            Some(node) => node,
            None => Node::from_id(client.clone(), &pending.id, options).await?,
        };
        info!("walked to {} at depth {}", node, pending.depth);

        if !visitor(&node)? {
            debug!("walk stopped by visitor with {} nodes unvisited", stack.len());
            return Ok(());
        }

        if node.node_type.is_leaf() {
            continue;
        }
        match &node.node_type {
            NodeType::Folder => {
                if max_depth.is_some_and(|max| pending.depth >= max) {
                    debug!("not descending below {}: depth limit reached", node.node_id);
                    continue;
                }
                if !node.has_children {
                    continue;
                }
                let depth = pending.depth + 1;
                Node::children_iter(client, &pending.id, options, |child| {
                    stack.push(Pending {
                        id: child.node_id.clone(),
                        node: Some(child),
                        depth,
                    });
                    Ok(true)
                })
                .await?;
            }
            other => return Err(SmugMugError::UnsupportedNodeType(other.to_string())),
        }
    }
    Ok(())
}
