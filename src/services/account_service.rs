// src/services/account_service.rs

use chrono::Utc;

use crate::{
    clients::XcsSession,
    common::{debounce::SearchDebouncer, error::AppError},
    models::{
        invitation::{CreateInviteLinkPayload, Invitation},
        roblox::{RobloxGroup, RobloxGroupRole},
        user::{
            AppCreated, CreateAppPayload, DefaultOrganization, UpdateProfilePayload, User,
        },
        ApiMessage,
    },
    services::preferences::PreferenceStore,
};

/// The signed-in user: profile, apps, admin tools, lookups and preferences.
#[derive(Clone)]
pub struct AccountService {
    debouncer: SearchDebouncer,
    preferences: PreferenceStore,
}

impl AccountService {
    pub fn new(debouncer: SearchDebouncer, preferences: PreferenceStore) -> Self {
        Self { debouncer, preferences }
    }

    // =========================================================================
    //  1. PROFILE
    // =========================================================================

    pub async fn me(&self, session: &XcsSession) -> Result<User, AppError> {
        session.get_me().await
    }

    pub async fn update_profile(
        &self,
        session: &XcsSession,
        payload: &UpdateProfilePayload,
    ) -> Result<ApiMessage, AppError> {
        session.update_profile(payload).await
    }

    pub async fn update_me(
        &self,
        session: &XcsSession,
        payload: &UpdateProfilePayload,
    ) -> Result<ApiMessage, AppError> {
        session.update_me(payload).await
    }

    pub async fn create_app(
        &self,
        session: &XcsSession,
        payload: &CreateAppPayload,
    ) -> Result<AppCreated, AppError> {
        let created = session.create_app(payload).await?;
        tracing::info!(app = %payload.name, "app registered");
        Ok(created)
    }

    // =========================================================================
    //  2. ADMIN
    // =========================================================================

    pub async fn create_invite_link(
        &self,
        session: &XcsSession,
        payload: &CreateInviteLinkPayload,
    ) -> Result<Invitation, AppError> {
        let created = session.create_invite_link(payload).await?;
        let created_at = Utc::now();

        Ok(Invitation {
            invitation_type: payload.invitation_type,
            code: created.code,
            max_uses: payload.max_uses,
            sender_id: created.sender_id,
            comment: payload.comment.clone(),
            created_at,
            expires_at: Invitation::expiry_for(created_at),
        })
    }

    /// Debounced per viewer: a burst of keystrokes yields one upstream call.
    pub async fn search_users(
        &self,
        session: &XcsSession,
        viewer_key: &str,
        query: &str,
    ) -> Result<Vec<User>, AppError> {
        let ticket = self.debouncer.settle(format!("{viewer_key}:users")).await?;
        let users = session.search_users(query.trim()).await?;
        self.debouncer.finish(ticket, users)
    }

    // =========================================================================
    //  3. ROBLOX
    // =========================================================================

    pub async fn roblox_group_search(
        &self,
        session: &XcsSession,
        viewer_key: &str,
        query: &str,
    ) -> Result<Vec<RobloxGroup>, AppError> {
        let ticket = self
            .debouncer
            .settle(format!("{viewer_key}:roblox-groups"))
            .await?;
        let groups = session.roblox_group_search(query.trim()).await?;
        self.debouncer.finish(ticket, groups)
    }

    pub async fn roblox_group_roles(
        &self,
        session: &XcsSession,
        group_id: u64,
    ) -> Result<Vec<RobloxGroupRole>, AppError> {
        session.roblox_group_roles(group_id).await
    }

    // =========================================================================
    //  4. PREFERENCES
    // =========================================================================

    pub async fn default_organization(&self, session: &XcsSession) -> Result<DefaultOrganization, AppError> {
        let me = session.get_me().await?;
        Ok(DefaultOrganization {
            organization_id: self.preferences.default_organization(&me.id),
        })
    }

    /// Only organizations the user can open may become the default; the
    /// lookup fails upstream otherwise.
    pub async fn set_default_organization(
        &self,
        session: &XcsSession,
        organization_id: &str,
    ) -> Result<DefaultOrganization, AppError> {
        let (me, organization) = tokio::try_join!(
            session.get_me(),
            session.get_organization(organization_id),
        )?;

        self.preferences.set_default_organization(&me.id, &organization.id);
        tracing::info!(user_id = %me.id, organization_id = %organization.id, "default organization set");
        Ok(DefaultOrganization {
            organization_id: Some(organization_id.to_string()),
        })
    }
}
