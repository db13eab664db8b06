//! Plan browser screen: pick any of the user's groups, then browse its
//! plans.
//!
//! Unlike the planner, which is pinned to the session's active group,
//! this screen lets the user look at every group they belong to.

use std::sync::Arc;

use studycircle_core::{sort_groups_by_name, Group, StudyPlan};
use studycircle_gateway::{BackendGateway, GatewayError};
use studycircle_session::SessionStore;

use crate::controllers::signed_in;
use crate::error::ControllerError;
use crate::state::ScreenState;

/// Two datasets: the group choices and the selected group's plans.
pub struct PlanBrowserController {
    gateway: Arc<BackendGateway>,
    session: Arc<SessionStore>,
    groups: ScreenState<Vec<Group>>,
    plans: ScreenState<Vec<StudyPlan>>,
}

impl PlanBrowserController {
    pub fn new(gateway: Arc<BackendGateway>, session: Arc<SessionStore>) -> Self {
        Self {
            gateway,
            session,
            groups: ScreenState::Loading,
            plans: ScreenState::Loading,
        }
    }

    pub fn groups(&self) -> &ScreenState<Vec<Group>> {
        &self.groups
    }

    pub fn plans(&self) -> &ScreenState<Vec<StudyPlan>> {
        &self.plans
    }

    /// Load the group choices, sorted by name case-insensitively.
    /// Selecting one of them is the caller's move once the choices are
    /// ready.
    pub async fn activate(&mut self) -> Result<(), ControllerError> {
        let (token, user_id) = signed_in(&self.session)?;
        self.groups = ScreenState::Loading;

        match self.gateway.list_groups_for_user(&token, &user_id).await {
            Ok(mut groups) => {
                sort_groups_by_name(&mut groups);
                self.groups = ScreenState::Ready(groups);
            }
            Err(GatewayError::Auth { .. }) => return Err(ControllerError::Unauthenticated),
            Err(err) => self.groups = ScreenState::Error(err.to_string()),
        }
        Ok(())
    }

    /// Load the plans of one of the offered groups.
    pub async fn select_group(&mut self, group_id: &str) -> Result<(), ControllerError> {
        let (token, _user_id) = signed_in(&self.session)?;
        self.plans = ScreenState::Loading;

        match self.gateway.list_plans(&token, group_id).await {
            Ok(plans) => self.plans = ScreenState::Ready(plans),
            Err(GatewayError::Auth { .. }) => return Err(ControllerError::Unauthenticated),
            Err(err) => self.plans = ScreenState::Error(err.to_string()),
        }
        Ok(())
    }
}
