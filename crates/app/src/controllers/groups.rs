//! Group browser screen: list, create, and join study groups.

use std::sync::Arc;

use studycircle_core::validation::validate_group_name;
use studycircle_core::{sort_groups_by_name, Group, NewGroup, NewGroupMember};
use studycircle_gateway::{BackendGateway, GatewayError};
use studycircle_session::SessionStore;

use crate::controllers::signed_in;
use crate::error::{route_or_notice, ControllerError};
use crate::state::ScreenState;

/// Lists the user's groups and drives group creation and joining.
pub struct GroupBrowserController {
    gateway: Arc<BackendGateway>,
    session: Arc<SessionStore>,
    state: ScreenState<Vec<Group>>,
}

impl GroupBrowserController {
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

    /// Load the group listing, sorted by name case-insensitively.
    pub async fn activate(&mut self) -> Result<(), ControllerError> {
        let (token, user_id) = signed_in(&self.session)?;
        self.state = ScreenState::Loading;

        match self.gateway.list_groups_for_user(&token, &user_id).await {
            Ok(mut groups) => {
                sort_groups_by_name(&mut groups);
                self.state = ScreenState::Ready(groups);
            }
            Err(GatewayError::Auth { .. }) => return Err(ControllerError::Unauthenticated),
            Err(err) => self.state = ScreenState::Error(err.to_string()),
        }
        Ok(())
    }

    /// Create a group and enroll the creator as its first member.
    ///
    /// Two independent network calls with no compensating transaction:
    /// if the join fails after a successful create, the group exists
    /// without the creator as a member, and only the join failure is
    /// surfaced. Not retried and not rolled back.
    pub async fn create_group(&mut self, name: &str) -> Result<Group, ControllerError> {
        validate_group_name(name).map_err(ControllerError::Invalid)?;
        let (token, user_id) = signed_in(&self.session)?;

        let group = self
            .gateway
            .create_group(&token, &NewGroup::new(name.trim()))
            .await
            .map_err(route_or_notice)?;
        tracing::info!(group_id = %group.id, "Group created");

        self.gateway
            .join_group(
                &token,
                &NewGroupMember {
                    user_id,
                    group_id: group.id.clone(),
                },
            )
            .await
            .map_err(route_or_notice)?;

        self.refresh().await;
        Ok(group)
    }

    /// Join an existing group by its id.
    pub async fn join_group(&mut self, group_id: &str) -> Result<(), ControllerError> {
        if group_id.trim().is_empty() {
            return Err(ControllerError::Invalid(
                "Group id must not be empty".to_string(),
            ));
        }
        let (token, user_id) = signed_in(&self.session)?;

        self.gateway
            .join_group(
                &token,
                &NewGroupMember {
                    user_id,
                    group_id: group_id.trim().to_string(),
                },
            )
            .await
            .map_err(route_or_notice)?;

        self.refresh().await;
        Ok(())
    }

    /// Pessimistic refresh after a successful mutation. A refresh
    /// failure only downgrades the screen state. The mutation itself
    /// already succeeded.
    async fn refresh(&mut self) {
        let Ok((token, user_id)) = signed_in(&self.session) else {
            return;
        };
        match self.gateway.list_groups_for_user(&token, &user_id).await {
            Ok(mut groups) => {
                sort_groups_by_name(&mut groups);
                self.state = ScreenState::Ready(groups);
            }
            Err(err) => self.state = ScreenState::Error(err.to_string()),
        }
    }
}
