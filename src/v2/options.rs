/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::{NodeTypeFilters, SortDirection, SortMethod};

/// Optional query parameters accepted by most GET endpoints.
///
/// ```rust
/// use smugmug_client::v2::{ApiOptions, SortDirection, SortMethod};
///
/// let options = ApiOptions::default()
///     .with_expansions(&["User", "ParentNode"])
///     .with_sorting(SortDirection::Descending, SortMethod::DateModified);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApiOptions {
    expansions: Vec<String>,
    filters: Vec<String>,
    sort_direction: Option<SortDirection>,
    sort_method: Option<SortMethod>,
    node_type: Option<NodeTypeFilters>,
    search_scope: Option<String>,
    search_text: Option<String>,
}

impl ApiOptions {
    /// Relations to side-load with the response (`_expand`)
    pub fn with_expansions(mut self, expansions: &[&str]) -> Self {
        self.expansions = expansions.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Limits the fields returned for each entity (`_filter`)
    pub fn with_filters(mut self, filters: &[&str]) -> Self {
        self.filters = filters.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn with_sorting(mut self, direction: SortDirection, method: SortMethod) -> Self {
        self.sort_direction = Some(direction);
        self.sort_method = Some(method);
        self
    }

    /// Restricts node children to a type
    pub fn with_node_type(mut self, node_type: NodeTypeFilters) -> Self {
        self.node_type = Some(node_type);
        self
    }

    /// Search terms for the `!search` endpoints. `scope` is the uri of the user,
    /// folder or album to look in; empty values are left out.
    pub fn with_search(mut self, scope: &str, text: &str) -> Self {
        self.search_scope = Some(scope.to_string()).filter(|v| !v.is_empty());
        self.search_text = Some(text.to_string()).filter(|v| !v.is_empty());
        self
    }

    pub fn expansions(&self) -> &[String] {
        &self.expansions
    }

    // Builds up the query parameters
    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("_verbosity".to_string(), "1".to_string())];
        if !self.expansions.is_empty() {
            params.push(("_expand".into(), self.expansions.join(",")));
        }
        if !self.filters.is_empty() {
            params.push(("_filter".into(), self.filters.join(",")));
        }
        if let Some(direction) = self.sort_direction {
            let direction: &'static str = direction.into();
            params.push(("SortDirection".into(), direction.into()));
        }
        match self.sort_method {
            None | Some(SortMethod::SortIndex) => (),
            Some(method) => {
                let method: &'static str = method.into();
                params.push(("SortMethod".into(), method.into()));
            }
        }
        match self.node_type {
            None | Some(NodeTypeFilters::Any) => (),
            Some(node_type) => {
                let node_type: &'static str = node_type.into();
                params.push(("Type".into(), node_type.into()));
            }
        }
        if let Some(scope) = &self.search_scope {
            params.push(("Scope".into(), scope.clone()));
        }
        if let Some(text) = &self.search_text {
            params.push(("Text".into(), text.clone()));
        }
        params
    }
}
