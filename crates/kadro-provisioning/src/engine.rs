//! The user provisioning engine.
//!
//! Turns external identity events into local user records under the
//! organization-membership invariant: every user belongs to a pre-existing,
//! active organization. All operations are idempotent: the provider may
//! deliver events more than once or out of order, and concurrent duplicate
//! deliveries are arbitrated by the database's uniqueness constraints
//! rather than locks.

use std::sync::Arc;

use chrono::Utc;
use kadro_core::{OrgId, SubjectId, UserId};
use kadro_db::models::{
    NewRole, NewUser, ProfileUpdate, Role, User, ROLES_ORG_ID_NAME_KEY, USERS_EMPLOYEE_CODE_KEY,
    USERS_EXTERNAL_ID_KEY, USERS_ORG_ID_EMPLOYEE_CODE_KEY,
};
use kadro_db::{DbError, RoleStore, TenantDirectory, UserStore};

use crate::code::generate_employee_code;
use crate::error::ProvisionError;
use crate::events::{
    DeletedUser, WebhookEvent, EVENT_USER_CREATED, EVENT_USER_DELETED, EVENT_USER_UPDATED,
};
use crate::external::ExternalUser;

/// Name of the default role every organization gets on demand.
pub const DEFAULT_ROLE_NAME: &str = "employee";

/// Permission level of the default role.
pub const DEFAULT_ROLE_LEVEL: i32 = 1;

/// Placeholder first name when the provider record carries none.
pub const PLACEHOLDER_FIRST_NAME: &str = "Unknown";

/// Retry ceiling for employee code generation.
pub const MAX_CODE_ATTEMPTS: u32 = 5;

/// Outcome of handling a webhook event.
#[derive(Debug)]
pub enum EventOutcome {
    /// A user was created, or already existed for a duplicate delivery.
    Created(User),

    /// A user's profile was updated.
    Updated(User),

    /// A user was soft-terminated.
    Terminated(User),

    /// The event referenced a user we never provisioned; nothing to do.
    NoOp,

    /// The event type is not one this engine acts on.
    Ignored,
}

/// The idempotent state-transition logic from identity events to users.
///
/// Collaborators are injected so tests run against in-memory fakes.
pub struct ProvisioningEngine {
    directory: Arc<dyn TenantDirectory>,
    users: Arc<dyn UserStore>,
    roles: Arc<dyn RoleStore>,
}

impl ProvisioningEngine {
    /// Create an engine over the given collaborators.
    #[must_use]
    pub fn new(
        directory: Arc<dyn TenantDirectory>,
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
    ) -> Self {
        Self {
            directory,
            users,
            roles,
        }
    }

    /// Dispatch a verified webhook event to the matching operation.
    ///
    /// Unrecognized event types are acknowledged and ignored, never
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::MalformedEvent` when a recognized type
    /// carries an undecodable payload, or the underlying operation's error.
    pub async fn handle_event(&self, event: WebhookEvent) -> Result<EventOutcome, ProvisionError> {
        match event.event_type.as_str() {
            EVENT_USER_CREATED => {
                let external: ExternalUser = serde_json::from_value(event.data)
                    .map_err(|e| ProvisionError::MalformedEvent(e.to_string()))?;
                let user = self.on_user_created(&external).await?;
                Ok(EventOutcome::Created(user))
            }
            EVENT_USER_UPDATED => {
                let external: ExternalUser = serde_json::from_value(event.data)
                    .map_err(|e| ProvisionError::MalformedEvent(e.to_string()))?;
                match self.on_user_updated(&external).await? {
                    Some(user) => Ok(EventOutcome::Updated(user)),
                    None => Ok(EventOutcome::NoOp),
                }
            }
            EVENT_USER_DELETED => {
                let deleted: DeletedUser = serde_json::from_value(event.data)
                    .map_err(|e| ProvisionError::MalformedEvent(e.to_string()))?;
                match self.on_user_deleted(&SubjectId::from(deleted.id.as_str())).await? {
                    Some(user) => Ok(EventOutcome::Terminated(user)),
                    None => Ok(EventOutcome::NoOp),
                }
            }
            other => {
                tracing::debug!(event_type = other, "ignoring unrecognized event type");
                Ok(EventOutcome::Ignored)
            }
        }
    }

    /// Provision a local user from a `user.created` event.
    ///
    /// Idempotent: a duplicate delivery returns the existing record
    /// unchanged, including when the duplicate arrives concurrently and
    /// loses the insert race.
    ///
    /// # Errors
    ///
    /// - `ProvisionError::MissingEmail` - no resolvable address
    /// - `ProvisionError::MissingTenantContext` - metadata names no
    ///   organization
    /// - `ProvisionError::UnknownOrInactiveOrganization` - the named
    ///   organization is absent from the directory or inactive
    /// - `ProvisionError::CodeGenerationExhausted` - employee code kept
    ///   colliding past the retry ceiling
    pub async fn on_user_created(&self, external: &ExternalUser) -> Result<User, ProvisionError> {
        let subject = external.subject_id();

        if let Some(existing) = self.users.find_by_external_id(&subject).await? {
            tracing::debug!(subject = %subject, "user already provisioned, returning existing record");
            return Ok(existing);
        }

        let email = external
            .primary_email()
            .ok_or(ProvisionError::MissingEmail)?
            .to_string();
        let first_name = external
            .first_name
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_FIRST_NAME.to_string());
        let last_name = external.last_name.clone().unwrap_or_default();
        let phone = external.primary_phone().map(ToString::to_string);

        let org_id = external
            .organization_id()
            .ok_or(ProvisionError::MissingTenantContext)?;

        match self.directory.find_org(&org_id).await? {
            Some(org) if org.is_active => {}
            _ => return Err(ProvisionError::UnknownOrInactiveOrganization(org_id)),
        }

        let role = self.resolve_default_role(&org_id).await?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let employee_code = generate_employee_code();
            if self.users.employee_code_exists(&employee_code).await? {
                tracing::debug!(attempt, "employee code already taken, regenerating");
                continue;
            }

            let new_user = NewUser {
                id: UserId::new(),
                external_id: subject.clone(),
                org_id: org_id.clone(),
                role_id: role.id,
                employee_code,
                email: email.clone(),
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                phone: phone.clone(),
                email_verified: true,
                phone_verified: phone.is_some(),
                joined_at: Utc::now(),
            };

            match self.users.insert(new_user).await {
                Ok(user) => {
                    tracing::info!(
                        subject = %subject,
                        org = %org_id,
                        employee_code = %user.employee_code,
                        "provisioned user"
                    );
                    return Ok(user);
                }
                Err(err) if err.violates(USERS_EXTERNAL_ID_KEY) => {
                    // A concurrent duplicate delivery won the race.
                    tracing::debug!(subject = %subject, "lost creation race, re-fetching");
                    return self
                        .users
                        .find_by_external_id(&subject)
                        .await?
                        .ok_or_else(|| {
                            ProvisionError::Db(DbError::NotFound(format!(
                                "user {subject} vanished after duplicate insert"
                            )))
                        });
                }
                Err(err)
                    if err.violates(USERS_EMPLOYEE_CODE_KEY)
                        || err.violates(USERS_ORG_ID_EMPLOYEE_CODE_KEY) =>
                {
                    tracing::debug!(attempt, "employee code collided on insert, regenerating");
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(ProvisionError::CodeGenerationExhausted {
            attempts: MAX_CODE_ATTEMPTS,
        })
    }

    /// Apply a `user.updated` event.
    ///
    /// Overwrites only mutable profile fields; organization and role are
    /// never touched by this path. An update for a user we never provisioned
    /// is a no-op; the eventual creation event is authoritative.
    pub async fn on_user_updated(
        &self,
        external: &ExternalUser,
    ) -> Result<Option<User>, ProvisionError> {
        let subject = external.subject_id();

        let Some(existing) = self.users.find_by_external_id(&subject).await? else {
            tracing::debug!(subject = %subject, "update for unprovisioned user, dropping");
            return Ok(None);
        };

        let phone = external.primary_phone().map(ToString::to_string);
        let update = ProfileUpdate {
            email: external
                .primary_email()
                .map_or_else(|| existing.email.clone(), ToString::to_string),
            first_name: external
                .first_name
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| existing.first_name.clone()),
            last_name: external
                .last_name
                .clone()
                .unwrap_or_else(|| existing.last_name.clone()),
            phone_verified: phone.is_some(),
            phone,
        };

        self.users
            .update_profile(&subject, update)
            .await
            .map_err(Into::into)
    }

    /// Apply a `user.deleted` event: soft status transition to `terminated`
    /// with a leave timestamp. Never a row delete. Absent user is a no-op.
    pub async fn on_user_deleted(
        &self,
        subject: &SubjectId,
    ) -> Result<Option<User>, ProvisionError> {
        let terminated = self.users.terminate(subject).await?;
        match &terminated {
            Some(user) => {
                tracing::info!(subject = %subject, user_id = %user.id, "terminated user");
            }
            None => {
                tracing::debug!(subject = %subject, "deletion for unprovisioned user, dropping");
            }
        }
        Ok(terminated)
    }

    /// Resolve the organization's default role, creating it on first use.
    ///
    /// A concurrent duplicate creation loses to the unique constraint and
    /// re-fetches the winner's row.
    async fn resolve_default_role(&self, org_id: &OrgId) -> Result<Role, ProvisionError> {
        if let Some(role) = self.roles.find_by_name(org_id, DEFAULT_ROLE_NAME).await? {
            return Ok(role);
        }

        match self
            .roles
            .insert(NewRole {
                org_id: org_id.clone(),
                name: DEFAULT_ROLE_NAME.to_string(),
                level: DEFAULT_ROLE_LEVEL,
            })
            .await
        {
            Ok(role) => Ok(role),
            Err(err) if err.violates(ROLES_ORG_ID_NAME_KEY) => self
                .roles
                .find_by_name(org_id, DEFAULT_ROLE_NAME)
                .await?
                .ok_or_else(|| {
                    ProvisionError::Db(DbError::NotFound(format!(
                        "default role for {org_id} vanished after duplicate insert"
                    )))
                }),
            Err(err) => Err(err.into()),
        }
    }
}
