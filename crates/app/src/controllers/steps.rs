//! Step list screen: the steps of one study plan.

use std::sync::Arc;

use studycircle_core::validation::validate_step_input;
use studycircle_core::{DueDate, NewStudyStep, PlanId, StudyStep};
use studycircle_gateway::{BackendGateway, GatewayError};
use studycircle_session::SessionStore;

use crate::error::{route_or_notice, ControllerError};
use crate::state::ScreenState;

/// Lists one plan's steps and drives step creation. The plan id is a
/// navigation parameter, not session state.
pub struct StepListController {
    gateway: Arc<BackendGateway>,
    session: Arc<SessionStore>,
    plan_id: PlanId,
    state: ScreenState<Vec<StudyStep>>,
}

impl StepListController {
    pub fn new(gateway: Arc<BackendGateway>, session: Arc<SessionStore>, plan_id: PlanId) -> Self {
        Self {
            gateway,
            session,
            plan_id,
            state: ScreenState::Loading,
        }
    }

    pub fn state(&self) -> &ScreenState<Vec<StudyStep>> {
        &self.state
    }

    fn token(&self) -> Result<String, ControllerError> {
        self.session
            .access_token()?
            .ok_or(ControllerError::Unauthenticated)
    }

    /// Load the step listing. A plan with no steps is `Ready` with an
    /// empty list: the screen shows its empty placeholder, not an
    /// error.
    pub async fn activate(&mut self) -> Result<(), ControllerError> {
        let token = self.token()?;
        self.state = ScreenState::Loading;

        match self.gateway.list_steps(&token, self.plan_id).await {
            Ok(steps) => self.state = ScreenState::Ready(steps),
            Err(GatewayError::Auth { .. }) => return Err(ControllerError::Unauthenticated),
            Err(err) => self.state = ScreenState::Error(err.to_string()),
        }
        Ok(())
    }

    /// Create a step in this plan, then re-read the listing (minimal
    /// reply, nothing to patch in locally).
    pub async fn add_step(&mut self, title: &str, due_date: &str) -> Result<(), ControllerError> {
        validate_step_input(title, due_date).map_err(ControllerError::Invalid)?;
        let due: DueDate = due_date.trim().parse().map_err(|_| {
            ControllerError::Invalid("Due date must be in YYYY-MM-DD form".to_string())
        })?;
        let token = self.token()?;

        self.gateway
            .create_step(
                &token,
                &NewStudyStep {
                    plan_id: self.plan_id,
                    title: title.trim().to_string(),
                    due_date: due,
                },
            )
            .await
            .map_err(route_or_notice)?;

        match self.gateway.list_steps(&token, self.plan_id).await {
            Ok(steps) => self.state = ScreenState::Ready(steps),
            Err(err) => self.state = ScreenState::Error(err.to_string()),
        }
        Ok(())
    }
}
