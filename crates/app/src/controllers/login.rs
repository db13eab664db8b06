//! Login screen and the sign-in workflow.

use std::fmt;
use std::sync::Arc;

use studycircle_core::validation::validate_credentials;
use studycircle_core::{Credentials, Profile};
use studycircle_gateway::{BackendGateway, GatewayError};
use studycircle_session::{SessionStore, SessionStoreError};

/// The ordered steps of the sign-in workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    /// Exchange credentials for a bearer token.
    Authenticate,
    /// Resolve the durable user id behind the token.
    ResolveUser,
    /// Create the profile row from a pending registration name.
    CreateProfile,
    /// Fetch the user's groups to pick the active one.
    FetchGroups,
}

impl fmt::Display for LoginStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoginStep::Authenticate => "authentication",
            LoginStep::ResolveUser => "user lookup",
            LoginStep::CreateProfile => "profile creation",
            LoginStep::FetchGroups => "group lookup",
        };
        f.write_str(name)
    }
}

/// A sign-in failure, tagged with the step that died. Steps already
/// completed have had their effects persisted; there is no compensation.
#[derive(Debug, thiserror::Error)]
#[error("sign-in failed during {step}: {source}")]
pub struct LoginFlowError {
    pub step: LoginStep,
    #[source]
    pub source: GatewayError,
}

/// Errors from the login screen.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Local input validation failed; nothing was sent.
    #[error("{0}")]
    Invalid(String),

    /// The session store failed while persisting sign-in state.
    #[error(transparent)]
    Session(#[from] SessionStoreError),

    /// A workflow step failed against the backend.
    #[error(transparent)]
    Flow(#[from] LoginFlowError),
}

/// Drives the sign-in workflow:
///
/// 1. authenticate, 2. resolve the user id (both persisted together),
/// 3. create the profile row if a registration left a display name
///    pending, 4. fetch the user's groups and remember the first as the
///    active group.
///
/// Each step short-circuits on failure. A failure partway leaves the
/// session exactly as far as the completed steps wrote it. Later
/// screens discover the gap, matching the backend-of-record design.
pub struct LoginController {
    gateway: Arc<BackendGateway>,
    session: Arc<SessionStore>,
}

impl LoginController {
    pub fn new(gateway: Arc<BackendGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), LoginError> {
        let credentials = Credentials::new(email.trim(), password);
        validate_credentials(&credentials).map_err(LoginError::Invalid)?;

        // Step 1: credentials -> bearer token.
        let token = self
            .gateway
            .login(&credentials)
            .await
            .map_err(|source| LoginFlowError {
                step: LoginStep::Authenticate,
                source,
            })?;

        // Step 2: token -> durable user id.
        let identity = self
            .gateway
            .fetch_current_user(&token)
            .await
            .map_err(|source| LoginFlowError {
                step: LoginStep::ResolveUser,
                source,
            })?;

        self.session.set_access_token(&token)?;
        self.session.set_user_id(&identity.id)?;
        tracing::info!(user_id = %identity.id, "Signed in");

        // Step 3: a pending display name from registration becomes the
        // profile row. The pending name is cleared only on success so an
        // interrupted first login retries next time.
        if let Some(name) = self.session.pending_display_name()? {
            self.gateway
                .create_profile(&token, &Profile::new(identity.id.clone(), name))
                .await
                .map_err(|source| LoginFlowError {
                    step: LoginStep::CreateProfile,
                    source,
                })?;
            self.session.clear_pending_display_name()?;
            tracing::info!(user_id = %identity.id, "Profile created");
        }

        // Step 4: remember the first group as the active one. Having no
        // groups yet is not a failure.
        let groups = self
            .gateway
            .list_groups_for_user(&token, &identity.id)
            .await
            .map_err(|source| LoginFlowError {
                step: LoginStep::FetchGroups,
                source,
            })?;

        if let Some(first) = groups.first() {
            self.session.set_active_group_id(&first.id)?;
        } else {
            tracing::debug!(user_id = %identity.id, "No group memberships yet");
        }

        Ok(())
    }
}
