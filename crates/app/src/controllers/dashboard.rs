//! Dashboard screen: the signed-in landing page with the user's groups.

use std::sync::Arc;

use studycircle_core::{sort_groups_by_name, Group};
use studycircle_gateway::{BackendGateway, GatewayError};
use studycircle_session::SessionStore;

use crate::controllers::signed_in;
use crate::error::ControllerError;
use crate::state::ScreenState;

/// Loads the user's group memberships and owns the logout action.
pub struct DashboardController {
    gateway: Arc<BackendGateway>,
    session: Arc<SessionStore>,
    state: ScreenState<Vec<Group>>,
}

impl DashboardController {
    pub fn new(gateway: Arc<BackendGateway>, session: Arc<SessionStore>) -> Self {
        Self {
            gateway,
            session,
            state: ScreenState::Loading,
        }
    }

    pub fn state(&self) -> &ScreenState<Vec<Group>> {
        &self.state
    }

    /// Load the dashboard dataset.
    ///
    /// `Err(Unauthenticated)` means route to the login flow; any other
    /// failure lands in the screen state as a notice.
    pub async fn activate(&mut self) -> Result<(), ControllerError> {
        let (token, user_id) = signed_in(&self.session)?;
        self.state = ScreenState::Loading;

        match self.gateway.list_groups_for_user(&token, &user_id).await {
            Ok(mut groups) => {
                sort_groups_by_name(&mut groups);
                self.state = ScreenState::Ready(groups);
            }
            Err(GatewayError::Auth { .. }) => return Err(ControllerError::Unauthenticated),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load groups");
                self.state = ScreenState::Error(err.to_string());
            }
        }
        Ok(())
    }

    /// Clear the whole session. The caller routes back to the login flow.
    pub fn sign_out(&self) -> Result<(), ControllerError> {
        self.session.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }
}
