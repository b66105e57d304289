// src/services/organization_service.rs

use crate::{
    clients::XcsSession,
    common::{error::AppError, sequence::RequestSequencer},
    models::{
        access_group::{AccessGroup, AccessGroupPayload, AccessGroupUpstream},
        options::{BulkRemoveFailure, BulkRemoveResult, MemberRow, MemberTable, OptionGroup, TableQuery},
        organization::{
            AddMemberPayload, Organization, OrganizationMember, OrganizationPayload,
            UpdateMemberPayload,
        },
        ApiMessage, CreatedResponse,
    },
    services::{
        access_group_options::build_access_group_options,
        member_actions::{
            can_edit_member_role, can_remove_member_in_edit_modal, member_actions,
            partition_bulk_removal,
        },
        preferences::PreferenceStore,
        scan_data::parse_scan_data,
        table_view::apply_table_view,
    },
};

/// An organization together with its member list and the viewer's membership.
struct Roster {
    organization: Organization,
    members: Vec<OrganizationMember>,
    acting: OrganizationMember,
}

impl Roster {
    fn owner_id(&self) -> Option<&str> {
        self.organization.owner_id()
    }

    fn member(&self, id: &str) -> Result<&OrganizationMember, AppError> {
        self.members
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Member '{id}' was not found in this organization.")))
    }
}

#[derive(Clone)]
pub struct OrganizationService {
    sequencer: RequestSequencer,
    preferences: PreferenceStore,
}

impl OrganizationService {
    pub fn new(sequencer: RequestSequencer, preferences: PreferenceStore) -> Self {
        Self { sequencer, preferences }
    }

    // =========================================================================
    //  1. ORGANIZATIONS
    // =========================================================================

    pub async fn list(&self, session: &XcsSession) -> Result<Vec<Organization>, AppError> {
        session.list_organizations().await
    }

    pub async fn get(&self, session: &XcsSession, id: &str) -> Result<Organization, AppError> {
        session.get_organization(id).await
    }

    pub async fn create(
        &self,
        session: &XcsSession,
        payload: &OrganizationPayload,
    ) -> Result<CreatedResponse, AppError> {
        let created = session.create_organization(payload).await?;
        tracing::info!(organization_id = ?created.id, "organization created");
        Ok(created)
    }

    pub async fn update(
        &self,
        session: &XcsSession,
        id: &str,
        payload: &OrganizationPayload,
    ) -> Result<ApiMessage, AppError> {
        session.update_organization(id, payload).await
    }

    pub async fn delete(&self, session: &XcsSession, id: &str) -> Result<ApiMessage, AppError> {
        let message = session.delete_organization(id).await?;
        self.preferences.clear_organization(id);
        tracing::info!(organization_id = %id, "organization deleted");
        Ok(message)
    }

    // =========================================================================
    //  2. MEMBERS
    // =========================================================================

    async fn roster(&self, session: &XcsSession, organization_id: &str) -> Result<Roster, AppError> {
        let (organization, members, me) = tokio::try_join!(
            session.get_organization(organization_id),
            session.list_members(organization_id),
            session.get_me(),
        )?;

        let acting = members
            .iter()
            .find(|m| m.id == me.id)
            .or_else(|| organization.member(&me.id))
            .cloned()
            .ok_or_else(|| AppError::Forbidden("You are not a member of this organization.".into()))?;

        Ok(Roster {
            organization,
            members,
            acting,
        })
    }

    /// The member table, each row carrying the actions the viewer may take.
    /// A response overtaken by a newer load of the same table is dropped.
    pub async fn member_table(
        &self,
        session: &XcsSession,
        viewer_key: &str,
        organization_id: &str,
        query: &TableQuery,
    ) -> Result<MemberTable, AppError> {
        // 1. Claim the latest slot for this table
        let ticket = self
            .sequencer
            .issue(format!("{viewer_key}:members:{organization_id}"));

        // 2. Fetch and attach row actions
        let roster = self.roster(session, organization_id).await?;
        let owner_id = roster.owner_id();

        let rows: Vec<MemberRow> = roster
            .members
            .iter()
            .map(|member| MemberRow {
                actions: member_actions(&roster.acting, member, owner_id),
                member: member.clone(),
            })
            .collect();

        let table = MemberTable {
            viewer_id: roster.acting.id.clone(),
            viewer_role: roster.acting.role,
            owner_id: owner_id.map(str::to_string),
            members: apply_table_view(&rows, &query.sort_status(), query.text(), &query.tag_list()),
        };

        // 3. Answer only if no newer load started meanwhile
        self.sequencer.finish(ticket, table)
    }

    pub async fn add_member(
        &self,
        session: &XcsSession,
        organization_id: &str,
        payload: &AddMemberPayload,
    ) -> Result<ApiMessage, AppError> {
        session.add_member(organization_id, payload).await
    }

    pub async fn update_member(
        &self,
        session: &XcsSession,
        organization_id: &str,
        member_id: &str,
        payload: &UpdateMemberPayload,
    ) -> Result<ApiMessage, AppError> {
        // 1. Load the organization as the caller sees it
        let roster = self.roster(session, organization_id).await?;
        let target = roster.member(member_id)?;

        // 2. Role changes follow the same rule as the editor
        if payload.role.is_some() && !can_edit_member_role(&roster.acting, target, roster.owner_id()) {
            return Err(AppError::Forbidden(
                "You cannot change this member's role.".into(),
            ));
        }

        // 3. Forward
        session.update_member(organization_id, member_id, payload).await
    }

    pub async fn remove_member(
        &self,
        session: &XcsSession,
        organization_id: &str,
        member_id: &str,
    ) -> Result<ApiMessage, AppError> {
        // 1. Load the organization as the caller sees it
        let roster = self.roster(session, organization_id).await?;
        let target = roster.member(member_id)?;

        // 2. Refuse locally, before any upstream write
        if !can_remove_member_in_edit_modal(&roster.acting, target, roster.owner_id()) {
            return Err(AppError::Forbidden("You cannot remove this member.".into()));
        }

        let message = session.remove_member(organization_id, member_id).await?;
        tracing::info!(organization_id, member_id, "member removed");
        Ok(message)
    }

    /// Removes every selected member except the viewer and the owner. One
    /// failure does not stop the others.
    pub async fn bulk_remove(
        &self,
        session: &XcsSession,
        organization_id: &str,
        member_ids: &[String],
    ) -> Result<BulkRemoveResult, AppError> {
        // 1. Split the selection: self and owner are skipped
        let roster = self.roster(session, organization_id).await?;
        let (removable, skipped) = partition_bulk_removal(&roster.acting, roster.owner_id(), member_ids);

        let mut result = BulkRemoveResult {
            removed: Vec::with_capacity(removable.len()),
            skipped: skipped.into_iter().map(str::to_string).collect(),
            failed: Vec::new(),
        };

        // 2. Remove one by one, collecting failures
        for member_id in removable {
            match session.remove_member(organization_id, member_id).await {
                Ok(_) => result.removed.push(member_id.to_string()),
                Err(e) => {
                    tracing::warn!(organization_id, member_id, error = %e, "bulk removal failed for member");
                    result.failed.push(BulkRemoveFailure {
                        id: member_id.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            organization_id,
            removed = result.removed.len(),
            skipped = result.skipped.len(),
            failed = result.failed.len(),
            "bulk member removal finished"
        );
        Ok(result)
    }

    // =========================================================================
    //  3. ACCESS GROUPS
    // =========================================================================

    pub async fn list_access_groups(
        &self,
        session: &XcsSession,
        organization_id: &str,
    ) -> Result<Vec<AccessGroup>, AppError> {
        session.list_access_groups(organization_id).await
    }

    /// Grouped multi-select options, optionally narrowed to one location.
    pub async fn access_group_options(
        &self,
        session: &XcsSession,
        organization_id: &str,
        location_id: Option<&str>,
    ) -> Result<Vec<OptionGroup>, AppError> {
        let groups = session.list_access_groups(organization_id).await?;
        Ok(build_access_group_options(&groups, location_id))
    }

    fn upstream_group(payload: &AccessGroupPayload) -> Result<AccessGroupUpstream, AppError> {
        Ok(AccessGroupUpstream {
            name: payload.name.trim().to_string(),
            group_type: payload.group_type,
            location_id: payload.location_id.clone(),
            scan_data: parse_scan_data("scanData", payload.scan_data.as_deref())?,
        })
    }

    pub async fn create_access_group(
        &self,
        session: &XcsSession,
        organization_id: &str,
        payload: &AccessGroupPayload,
    ) -> Result<CreatedResponse, AppError> {
        let body = Self::upstream_group(payload)?;
        session.create_access_group(organization_id, &body).await
    }

    pub async fn update_access_group(
        &self,
        session: &XcsSession,
        organization_id: &str,
        group_id: &str,
        payload: &AccessGroupPayload,
    ) -> Result<ApiMessage, AppError> {
        let body = Self::upstream_group(payload)?;
        session.update_access_group(organization_id, group_id, &body).await
    }

    pub async fn delete_access_group(
        &self,
        session: &XcsSession,
        organization_id: &str,
        group_id: &str,
    ) -> Result<ApiMessage, AppError> {
        session.delete_access_group(organization_id, group_id).await
    }
}
