//! Planner screen: study plans of the active group.

use std::sync::Arc;

use studycircle_core::validation::validate_plan_title;
use studycircle_core::{NewStudyPlan, StudyPlan};
use studycircle_gateway::{BackendGateway, GatewayError};
use studycircle_session::SessionStore;

use crate::error::{route_or_notice, ControllerError};
use crate::state::ScreenState;

/// Lists the active group's plans and drives plan creation.
///
/// Requires a token and an active group id in the session. A missing
/// group id routes away just like a missing token, because the screen
/// cannot do anything without one.
pub struct PlannerController {
    gateway: Arc<BackendGateway>,
    session: Arc<SessionStore>,
    state: ScreenState<Vec<StudyPlan>>,
}

impl PlannerController {
    pub fn new(gateway: Arc<BackendGateway>, session: Arc<SessionStore>) -> Self {
        Self {
            gateway,
            session,
            state: ScreenState::Loading,
        }
    }

    pub fn state(&self) -> &ScreenState<Vec<StudyPlan>> {
        &self.state
    }

    fn required_session(&self) -> Result<(String, String), ControllerError> {
        let token = self
            .session
            .access_token()?
            .ok_or(ControllerError::Unauthenticated)?;
        let group_id = self
            .session
            .active_group_id()?
            .ok_or(ControllerError::Unauthenticated)?;
        Ok((token, group_id))
    }

    /// Load the plan listing, in server return order.
    pub async fn activate(&mut self) -> Result<(), ControllerError> {
        let (token, group_id) = self.required_session()?;
        self.state = ScreenState::Loading;

        match self.gateway.list_plans(&token, &group_id).await {
            Ok(plans) => self.state = ScreenState::Ready(plans),
            Err(GatewayError::Auth { .. }) => return Err(ControllerError::Unauthenticated),
            Err(err) => self.state = ScreenState::Error(err.to_string()),
        }
        Ok(())
    }

    /// Create a plan in the active group, then re-read the listing:
    /// plan creation returns a minimal reply, so there is no row to
    /// patch in locally.
    pub async fn add_plan(&mut self, title: &str) -> Result<(), ControllerError> {
        validate_plan_title(title).map_err(ControllerError::Invalid)?;
        let (token, group_id) = self.required_session()?;

        self.gateway
            .create_plan(
                &token,
                &NewStudyPlan {
                    group_id: group_id.clone(),
                    title: title.trim().to_string(),
                },
            )
            .await
            .map_err(route_or_notice)?;

        match self.gateway.list_plans(&token, &group_id).await {
            Ok(plans) => self.state = ScreenState::Ready(plans),
            Err(err) => self.state = ScreenState::Error(err.to_string()),
        }
        Ok(())
    }
}
