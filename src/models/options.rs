// src/models/options.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::organization::{MemberRole, OrganizationMember};

/// One entry of a select/autocomplete widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A labelled block of options in a grouped multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OptionGroup {
    pub label: String,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortStatus {
    pub column_accessor: String,
    pub direction: SortDirection,
}

impl Default for SortStatus {
    fn default() -> Self {
        Self {
            column_accessor: "name".to_string(),
            direction: SortDirection::Asc,
        }
    }
}

/// Which row actions the viewer gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberActions {
    pub can_edit: bool,
    /// Remove button in the member table.
    pub can_remove: bool,
    /// Remove button inside the member edit dialog.
    pub can_remove_from_editor: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberRow {
    #[serde(flatten)]
    pub member: OrganizationMember,
    pub actions: MemberActions,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberTable {
    pub viewer_id: String,
    pub viewer_role: MemberRole,
    pub owner_id: Option<String>,
    pub members: Vec<MemberRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkRemoveResult {
    pub removed: Vec<String>,
    /// Ids the bulk action refused to touch (the viewer and the owner).
    pub skipped: Vec<String>,
    pub failed: Vec<BulkRemoveFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkRemoveFailure {
    pub id: String,
    pub message: String,
}

/// Query string of every filtered table endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TableQuery {
    /// Free-text name filter (already debounced by the dashboard).
    pub query: Option<String>,
    /// Comma-separated tag filter.
    pub tags: Option<String>,
    /// Column accessor to sort by. Defaults to `name`.
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
}

impl TableQuery {
    pub fn sort_status(&self) -> SortStatus {
        SortStatus {
            column_accessor: self
                .sort
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "name".to_string()),
            direction: self.direction.unwrap_or_default(),
        }
    }

    pub fn text(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }

    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_query_defaults_to_name_ascending() {
        let query = TableQuery::default();
        assert_eq!(query.sort_status(), SortStatus::default());
        assert_eq!(query.text(), "");
        assert!(query.tag_list().is_empty());
    }

    #[test]
    fn table_query_splits_tags() {
        let query = TableQuery {
            tags: Some("lobby, ,ground-floor".into()),
            direction: Some(SortDirection::Desc),
            sort: Some("unlockTime".into()),
            ..Default::default()
        };
        assert_eq!(query.tag_list(), vec!["lobby", "ground-floor"]);
        assert_eq!(query.sort_status().direction, SortDirection::Desc);
        assert_eq!(query.sort_status().column_accessor, "unlockTime");
    }
}
