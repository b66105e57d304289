// src/services/table_view.rs

use std::cmp::Ordering;

use crate::{
    models::{
        access_group::{AccessGroup, AccessGroupType},
        access_point::AccessPoint,
        location::Location,
        options::{MemberRow, SortDirection, SortStatus},
        organization::OrganizationMember,
    },
    services::tags::Tagged,
};

/// A column value as the table sorts it. Missing values sort after everything.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    Bool(bool),
    Number(f64),
    Text(&'a str),
    Missing,
}

impl SortValue<'_> {
    fn rank(&self) -> u8 {
        match self {
            SortValue::Bool(_) => 0,
            SortValue::Number(_) => 1,
            SortValue::Text(_) => 2,
            SortValue::Missing => 3,
        }
    }

    pub fn cmp_ascending(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Bool(a), SortValue::Bool(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl<'a> From<Option<&'a str>> for SortValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(SortValue::Missing, SortValue::Text)
    }
}

/// A row of a client-side filtered table.
pub trait TableRecord: Tagged {
    fn name(&self) -> &str;
    fn sort_value(&self, column: &str) -> SortValue<'_>;
}

/// Produces the visible rows of a table.
///
/// 1. stable ascending sort on `sort.column_accessor`;
/// 2. for `desc`, the ascending result is reversed (ties come out reversed too);
/// 3. name must contain the trimmed query, case-insensitively;
/// 4. tags must intersect `tag_query`.
///
/// Steps 3 and 4 are skipped when their input is empty.
pub fn apply_table_view<T>(
    records: &[T],
    sort: &SortStatus,
    debounced_query: &str,
    tag_query: &[String],
) -> Vec<T>
where
    T: TableRecord + Clone,
{
    let column = sort.column_accessor.as_str();

    let mut rows: Vec<&T> = records.iter().collect();
    rows.sort_by(|a, b| a.sort_value(column).cmp_ascending(&b.sort_value(column)));
    if sort.direction == SortDirection::Desc {
        rows.reverse();
    }

    let query = debounced_query.trim().to_lowercase();

    rows.into_iter()
        .filter(|row| query.is_empty() || row.name().to_lowercase().contains(&query))
        .filter(|row| tag_query.is_empty() || row.tags().iter().any(|t| tag_query.contains(t)))
        .cloned()
        .collect()
}

// ---
// Records
// ---

impl Tagged for AccessPoint {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl TableRecord for AccessPoint {
    fn name(&self) -> &str {
        &self.name
    }

    fn sort_value(&self, column: &str) -> SortValue<'_> {
        match column {
            "id" => SortValue::Text(&self.id),
            "name" => SortValue::Text(&self.name),
            "description" => self.description.as_deref().into(),
            "active" => SortValue::Bool(self.config.active),
            "armed" => SortValue::Bool(self.config.armed),
            "unlockTime" => SortValue::Number(f64::from(self.config.unlock_time)),
            _ => SortValue::Missing,
        }
    }
}

impl Tagged for Location {
    fn tags(&self) -> &[String] {
        &[]
    }
}

impl TableRecord for Location {
    fn name(&self) -> &str {
        &self.name
    }

    fn sort_value(&self, column: &str) -> SortValue<'_> {
        match column {
            "id" => SortValue::Text(&self.id),
            "name" => SortValue::Text(&self.name),
            "description" => self.description.as_deref().into(),
            "enabled" => SortValue::Bool(self.enabled),
            _ => SortValue::Missing,
        }
    }
}

impl Tagged for AccessGroup {
    fn tags(&self) -> &[String] {
        &[]
    }
}

impl TableRecord for AccessGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn sort_value(&self, column: &str) -> SortValue<'_> {
        match column {
            "id" => SortValue::Text(&self.id),
            "name" => SortValue::Text(&self.name),
            "type" => SortValue::Text(match self.group_type {
                AccessGroupType::Organization => "organization",
                AccessGroupType::Location => "location",
            }),
            "locationName" => self.location_name.as_deref().into(),
            _ => SortValue::Missing,
        }
    }
}

impl Tagged for OrganizationMember {
    fn tags(&self) -> &[String] {
        &[]
    }
}

impl TableRecord for OrganizationMember {
    fn name(&self) -> &str {
        self.label()
    }

    fn sort_value(&self, column: &str) -> SortValue<'_> {
        match column {
            "id" => SortValue::Text(&self.id),
            "name" | "displayName" => SortValue::Text(self.label()),
            "username" => self.username.as_deref().into(),
            "role" => SortValue::Number(f64::from(self.role as u8)),
            "joinedAt" => self
                .joined_at
                .map_or(SortValue::Missing, |at| SortValue::Number(at.timestamp_millis() as f64)),
            _ => SortValue::Missing,
        }
    }
}

impl Tagged for MemberRow {
    fn tags(&self) -> &[String] {
        &[]
    }
}

impl TableRecord for MemberRow {
    fn name(&self) -> &str {
        self.member.name()
    }

    fn sort_value(&self, column: &str) -> SortValue<'_> {
        self.member.sort_value(column)
    }
}
