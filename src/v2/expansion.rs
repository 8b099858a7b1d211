/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Side-loaded ("expanded") relations.
//!
//! When a request carries `_expand=User,ParentNode,...` the API answers with the
//! primary entity plus an `Expansions` object keyed by the uri of each related
//! resource. Each value wraps the related entity under its type name, e.g.
//! `{"User": {...}}`. Lookups are plain string equality on the uri exactly as
//! the server wrote it into the entity's `Uris` block.

use crate::v2::errors::SmugMugError;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use std::collections::HashMap;

/// Raw side-loaded payloads keyed by resource uri
pub type Expansions = HashMap<String, Box<RawValue>>;

/// Entities whose relations can be filled in from side-loaded payloads.
///
/// Implementations only ever assign relation fields, so resolving the same
/// entity against the same expansions more than once gives the same result.
pub trait Expandable {
    fn expand(&mut self, expansions: &Expansions) -> Result<(), SmugMugError>;
}

/// Applies [`Expandable::expand`] to every entity of a page
pub fn expand_all<T: Expandable>(
    items: &mut [T],
    expansions: &Expansions,
) -> Result<(), SmugMugError> {
    if expansions.is_empty() {
        return Ok(());
    }
    items.iter_mut().try_for_each(|item| item.expand(expansions))
}

/// Decodes the relation named `type_name` found at `uri`.
///
/// Returns `Ok(None)` when there is no uri, nothing was side-loaded for it, or
/// the payload does not carry `type_name`. A payload that fails to decode is an
/// error.
pub(crate) fn side_loaded<T: DeserializeOwned>(
    expansions: &Expansions,
    uri: Option<&str>,
    type_name: &str,
) -> Result<Option<T>, SmugMugError> {
    let Some(raw) = uri.and_then(|uri| expansions.get(uri)) else {
        return Ok(None);
    };
    let mut wrapper: HashMap<String, Box<RawValue>> = serde_json::from_str(raw.get())?;
    wrapper
        .remove(type_name)
        .map(|inner| serde_json::from_str::<T>(inner.get()))
        .transpose()
        .map_err(SmugMugError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Thing {
        #[serde(rename = "Name")]
        name: String,
    }

    fn expansions(entries: &[(&str, &str)]) -> Expansions {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), RawValue::from_string(v.to_string()).unwrap()))
            .collect()
    }

    #[test]
    fn missing_uri_is_not_an_error() {
        let exp = expansions(&[("/api/v2/user/cmac", r#"{"Thing": {"Name": "a"}}"#)]);
        let found: Option<Thing> = side_loaded(&exp, Some("/api/v2/user/other"), "Thing").unwrap();
        assert!(found.is_none());
        let found: Option<Thing> = side_loaded(&exp, None, "Thing").unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn decodes_wrapped_payload() {
        let exp = expansions(&[("/api/v2/user/cmac", r#"{"Thing": {"Name": "a"}}"#)]);
        let found: Option<Thing> = side_loaded(&exp, Some("/api/v2/user/cmac"), "Thing").unwrap();
        assert_eq!(found, Some(Thing { name: "a".into() }));
    }

    #[test]
    fn payload_without_type_member_leaves_relation_unset() {
        let exp = expansions(&[("/api/v2/user/cmac", r#"{"Other": {"Name": "a"}}"#)]);
        let found: Option<Thing> = side_loaded(&exp, Some("/api/v2/user/cmac"), "Thing").unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let exp = expansions(&[("/api/v2/user/cmac", r#"{"Thing": {"Name": 12}}"#)]);
        let found: Result<Option<Thing>, _> = side_loaded(&exp, Some("/api/v2/user/cmac"), "Thing");
        assert!(matches!(found, Err(SmugMugError::Deserialization(_))));

        let exp = expansions(&[("/api/v2/user/cmac", r#"[1, 2]"#)]);
        let found: Result<Option<Thing>, _> = side_loaded(&exp, Some("/api/v2/user/cmac"), "Thing");
        assert!(found.is_err());
    }

    #[test]
    fn lookup_is_exact_string_match() {
        let exp = expansions(&[("/api/v2/user/cmac", r#"{"Thing": {"Name": "a"}}"#)]);
        let found: Option<Thing> = side_loaded(&exp, Some("/api/v2/user/cmac/"), "Thing").unwrap();
        assert!(found.is_none());
    }
}
