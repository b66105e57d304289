// src/services/member_actions.rs

use crate::models::{
    options::MemberActions,
    organization::{MemberRole, OrganizationMember},
};

fn is_owner(target: &OrganizationMember, owner_id: Option<&str>) -> bool {
    owner_id == Some(target.id.as_str())
}

fn is_self(acting: &OrganizationMember, target: &OrganizationMember) -> bool {
    acting.id == target.id
}

/// Remove control in the member table: hidden for the owner and for yourself.
pub fn can_remove_member(
    acting: &OrganizationMember,
    target: &OrganizationMember,
    owner_id: Option<&str>,
) -> bool {
    !is_owner(target, owner_id) && !is_self(acting, target)
}

/// Remove control inside the member edit dialog.
///
/// On top of the table rule, only Managers and Owners may remove, and never
/// someone holding the Owner role. The two checks overlap for an acting
/// owner; they stay separate so changing one does not move the other.
pub fn can_remove_member_in_edit_modal(
    acting: &OrganizationMember,
    target: &OrganizationMember,
    owner_id: Option<&str>,
) -> bool {
    can_remove_member(acting, target, owner_id)
        && acting.role >= MemberRole::Manager
        && target.role != MemberRole::Owner
}

/// Role editing: Managers and Owners only, and the owner is never demoted.
pub fn can_edit_member_role(
    acting: &OrganizationMember,
    target: &OrganizationMember,
    owner_id: Option<&str>,
) -> bool {
    acting.role >= MemberRole::Manager && !is_owner(target, owner_id)
}

pub fn member_actions(
    acting: &OrganizationMember,
    target: &OrganizationMember,
    owner_id: Option<&str>,
) -> MemberActions {
    MemberActions {
        can_edit: can_edit_member_role(acting, target, owner_id),
        can_remove: can_remove_member(acting, target, owner_id),
        can_remove_from_editor: can_remove_member_in_edit_modal(acting, target, owner_id),
    }
}

/// Splits a bulk selection into ids the bulk action may remove and ids it
/// must skip (the acting member and the owner).
pub fn partition_bulk_removal<'a>(
    acting: &OrganizationMember,
    owner_id: Option<&str>,
    selected: &'a [String],
) -> (Vec<&'a str>, Vec<&'a str>) {
    selected
        .iter()
        .map(String::as_str)
        .partition(|id| *id != acting.id && Some(*id) != owner_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn member(id: &str, role: MemberRole) -> OrganizationMember {
        serde_json::from_value(serde_json::json!({"id": id, "role": role})).unwrap()
    }

    const OWNER: Option<&str> = Some("u2");

    #[rstest]
    #[case::owner_is_protected(member("u2", MemberRole::Owner), false)]
    #[case::self_is_protected(member("u1", MemberRole::Manager), false)]
    #[case::regular_member(member("u3", MemberRole::Member), true)]
    fn table_remove_control(#[case] target: OrganizationMember, #[case] shown: bool) {
        let acting = member("u1", MemberRole::Manager);
        assert_eq!(can_remove_member(&acting, &target, OWNER), shown);
    }

    #[test]
    fn editor_requires_manager_or_owner() {
        let acting = member("u4", MemberRole::Member);
        let target = member("u3", MemberRole::Member);

        assert!(can_remove_member(&acting, &target, OWNER));
        assert!(!can_remove_member_in_edit_modal(&acting, &target, OWNER));
    }

    #[test]
    fn editor_never_removes_an_owner_role_holder() {
        // A co-owner who is not the organization's recorded owner.
        let acting = member("u2", MemberRole::Owner);
        let target = member("u5", MemberRole::Owner);

        assert!(can_remove_member(&acting, &target, OWNER));
        assert!(!can_remove_member_in_edit_modal(&acting, &target, OWNER));
    }

    #[test]
    fn owner_is_never_editable() {
        let acting = member("u1", MemberRole::Manager);
        let owner = member("u2", MemberRole::Owner);
        let regular = member("u3", MemberRole::Member);

        assert!(!can_edit_member_role(&acting, &owner, OWNER));
        assert!(can_edit_member_role(&acting, &regular, OWNER));
        assert!(!can_edit_member_role(&member("u6", MemberRole::Member), &regular, OWNER));
    }

    #[test]
    fn actions_bundle_every_rule() {
        let acting = member("u1", MemberRole::Manager);
        let target = member("u3", MemberRole::Member);

        assert_eq!(
            member_actions(&acting, &target, OWNER),
            MemberActions {
                can_edit: true,
                can_remove: true,
                can_remove_from_editor: true,
            }
        );
    }

    #[test]
    fn bulk_removal_skips_self_and_owner() {
        let acting = member("u1", MemberRole::Manager);
        let selected = vec!["u1".to_string(), "u2".to_string(), "u3".to_string()];

        let (removable, skipped) = partition_bulk_removal(&acting, OWNER, &selected);

        assert_eq!(removable, vec!["u3"]);
        assert_eq!(skipped, vec!["u1", "u2"]);
    }
}
