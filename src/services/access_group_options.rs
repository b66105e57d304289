// src/services/access_group_options.rs

use crate::models::{
    access_group::{AccessGroup, AccessGroupType},
    options::{OptionGroup, SelectOption},
};

pub const ORGANIZATION_BUCKET: &str = "Organization";

/// Label of the bucket a group is listed under in the multi-select.
pub fn group_type_label(group: &AccessGroup) -> &str {
    match group.group_type {
        AccessGroupType::Organization => ORGANIZATION_BUCKET,
        AccessGroupType::Location => group
            .location_name
            .as_deref()
            .or(group.location_id.as_deref())
            .unwrap_or("Location"),
    }
}

/// Scope a bucket collects. Location buckets are told apart by id, so a
/// location named like the organization bucket still stays separate.
#[derive(Debug, PartialEq, Eq)]
enum BucketKey<'a> {
    Location(&'a str),
    Organization,
}

fn bucket_key(group: &AccessGroup) -> BucketKey<'_> {
    match group.group_type {
        AccessGroupType::Organization => BucketKey::Organization,
        AccessGroupType::Location => BucketKey::Location(
            group
                .location_id
                .as_deref()
                .or(group.location_name.as_deref())
                .unwrap_or_default(),
        ),
    }
}

/// Builds the grouped options for an access-group multi-select.
///
/// Buckets appear in the order their first group is encountered, except the
/// `"Organization"` bucket which always goes last. With `location_id` set,
/// groups scoped to other locations are left out. No groups means no buckets:
/// callers render their own empty state.
pub fn build_access_group_options(
    groups: &[AccessGroup],
    location_id: Option<&str>,
) -> Vec<OptionGroup> {
    let mut buckets: Vec<(BucketKey<'_>, OptionGroup)> = Vec::new();

    for group in groups {
        if let (AccessGroupType::Location, Some(target)) = (group.group_type, location_id) {
            if group.location_id.as_deref() != Some(target) {
                continue;
            }
        }

        let key = bucket_key(group);
        let option = SelectOption::new(group.id.clone(), group.name.clone());

        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, bucket)) => bucket.options.push(option),
            None => buckets.push((
                key,
                OptionGroup {
                    label: group_type_label(group).to_string(),
                    options: vec![option],
                },
            )),
        }
    }

    // Stable: everything but the organization bucket keeps encounter order.
    buckets.sort_by_key(|(key, _)| *key == BucketKey::Organization);
    buckets.into_iter().map(|(_, bucket)| bucket).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn org_group(id: &str, name: &str) -> AccessGroup {
        serde_json::from_value(json!({"id": id, "name": name, "type": "organization"})).unwrap()
    }

    fn loc_group(id: &str, name: &str, location_id: &str, location_name: Option<&str>) -> AccessGroup {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "type": "location",
            "locationId": location_id,
            "locationName": location_name,
        }))
        .unwrap()
    }

    #[test]
    fn organization_bucket_is_pinned_last() {
        let groups = vec![
            org_group("g2", "AllStaff"),
            loc_group("g1", "Front", "L1", None),
        ];

        let options = build_access_group_options(&groups, None);

        let labels: Vec<&str> = options.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["L1", "Organization"]);
        assert_eq!(options[0].options, vec![SelectOption::new("g1", "Front")]);
        assert_eq!(options[1].options, vec![SelectOption::new("g2", "AllStaff")]);
    }

    #[test]
    fn location_buckets_keep_encounter_order_not_alphabetical() {
        let groups = vec![
            loc_group("a", "Gate", "L2", Some("Warehouse")),
            org_group("b", "Everyone"),
            loc_group("c", "Lobby", "L1", Some("Annex")),
            loc_group("d", "Dock", "L2", Some("Warehouse")),
        ];

        let options = build_access_group_options(&groups, None);

        let labels: Vec<&str> = options.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Warehouse", "Annex", "Organization"]);
        assert_eq!(
            options[0].options,
            vec![SelectOption::new("a", "Gate"), SelectOption::new("d", "Dock")]
        );
    }

    #[test]
    fn target_location_drops_other_locations_only() {
        let groups = vec![
            loc_group("a", "Gate", "L2", Some("Warehouse")),
            org_group("b", "Everyone"),
            loc_group("c", "Lobby", "L1", Some("Annex")),
        ];

        let options = build_access_group_options(&groups, Some("L1"));

        let labels: Vec<&str> = options.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Annex", "Organization"]);
    }

    #[test]
    fn location_named_organization_keeps_its_own_bucket() {
        let groups = vec![
            org_group("a", "Everyone"),
            loc_group("b", "Lobby", "L1", Some("Organization")),
            loc_group("c", "Gate", "L2", Some("Annex")),
        ];

        let options = build_access_group_options(&groups, None);

        assert_eq!(options.len(), 3);
        assert_eq!(options[0].options, vec![SelectOption::new("b", "Lobby")]);
        assert_eq!(options[1].label, "Annex");
        assert_eq!(options[2].options, vec![SelectOption::new("a", "Everyone")]);
    }

    #[test]
    fn no_groups_means_no_buckets() {
        assert!(build_access_group_options(&[], None).is_empty());
        assert!(build_access_group_options(&[], Some("L1")).is_empty());
    }
}
