//! Task list screen: the user's personal tasks.

use std::sync::Arc;

use studycircle_core::validation::validate_task_input;
use studycircle_core::{DueDate, NewTask, Task, TaskId};
use studycircle_gateway::{BackendGateway, GatewayError};
use studycircle_session::SessionStore;

use crate::controllers::signed_in;
use crate::error::{route_or_notice, ControllerError};
use crate::state::ScreenState;

/// Lists the user's tasks and drives add, toggle, and delete.
///
/// Mutations patch the in-memory list optimistically with the
/// server-returned row; no re-read after a task write.
pub struct TaskListController {
    gateway: Arc<BackendGateway>,
    session: Arc<SessionStore>,
    state: ScreenState<Vec<Task>>,
}

impl TaskListController {
    pub fn new(gateway: Arc<BackendGateway>, session: Arc<SessionStore>) -> Self {
        Self {
            gateway,
            session,
            state: ScreenState::Loading,
        }
    }

    pub fn state(&self) -> &ScreenState<Vec<Task>> {
        &self.state
    }

    /// Load the task listing, preserving server return order.
    pub async fn activate(&mut self) -> Result<(), ControllerError> {
        let (token, user_id) = signed_in(&self.session)?;
        self.state = ScreenState::Loading;

        match self.gateway.list_tasks(&token, &user_id).await {
            Ok(tasks) => self.state = ScreenState::Ready(tasks),
            Err(GatewayError::Auth { .. }) => return Err(ControllerError::Unauthenticated),
            Err(err) => self.state = ScreenState::Error(err.to_string()),
        }
        Ok(())
    }

    /// Create a task for the signed-in user and append the persisted row.
    pub async fn add_task(&mut self, title: &str, due_date: &str) -> Result<(), ControllerError> {
        validate_task_input(title, due_date).map_err(ControllerError::Invalid)?;
        let due: DueDate = due_date.trim().parse().map_err(|_| {
            ControllerError::Invalid("Due date must be in YYYY-MM-DD form".to_string())
        })?;
        let (token, user_id) = signed_in(&self.session)?;

        let created = self
            .gateway
            .create_task(&token, &NewTask::new(title.trim(), due, user_id))
            .await
            .map_err(route_or_notice)?;

        if let ScreenState::Ready(tasks) = &mut self.state {
            tasks.push(created);
        }
        Ok(())
    }

    /// Flip a task's completion flag and replace the row in place with
    /// the server-returned one.
    pub async fn toggle_completion(&mut self, task_id: TaskId) -> Result<(), ControllerError> {
        let completed = self
            .state
            .data()
            .and_then(|tasks| tasks.iter().find(|t| t.id == task_id))
            .map(|t| !t.completed)
            .ok_or_else(|| ControllerError::Invalid("Unknown task".to_string()))?;
        let (token, _user_id) = signed_in(&self.session)?;

        let updated = self
            .gateway
            .update_task_completion(&token, task_id, completed)
            .await
            .map_err(route_or_notice)?;

        if let ScreenState::Ready(tasks) = &mut self.state {
            if let Some(slot) = tasks.iter_mut().find(|t| t.id == task_id) {
                *slot = updated;
            }
        }
        Ok(())
    }

    /// Delete a task and drop it from the in-memory list.
    pub async fn delete_task(&mut self, task_id: TaskId) -> Result<(), ControllerError> {
        let (token, _user_id) = signed_in(&self.session)?;

        self.gateway
            .delete_task(&token, task_id)
            .await
            .map_err(route_or_notice)?;

        if let ScreenState::Ready(tasks) = &mut self.state {
            tasks.retain(|t| t.id != task_id);
        }
        Ok(())
    }
}
