/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::{NodeType, PrivacyLevel};
use serde::{Deserialize, Serializer};
use std::str::FromStr;

// Parses node type, keeping unrecognized names
pub fn from_node_type<'de, D>(deserializer: D) -> Result<NodeType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(NodeType::from_str(&s).unwrap_or(NodeType::Unknown(s)))
}

// Writes node type back out the way the API names it
pub fn to_node_type<S>(node_type: &NodeType, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(node_type.as_str())
}

// Parses privacy type
pub fn from_privacy<'de, D>(deserializer: D) -> Result<Option<PrivacyLevel>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(PrivacyLevel::from_str(&s).ok().or(Some(PrivacyLevel::Unknown)))
}

// Parses strings that may be "" and sets to None
pub fn from_empty_str_to_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

pub fn is_none_or_empty_str(v: &Option<String>) -> bool {
    v.as_ref().is_none_or(|v| v.is_empty())
}

pub fn default_true() -> bool {
    true
}
