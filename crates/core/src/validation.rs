//! Non-empty input checks performed before a request leaves the client.
//!
//! These are deliberately weak: the backend owns the real rules (password
//! strength, email uniqueness, foreign keys). The client only refuses to
//! send fields the user left blank.

use crate::profile::Credentials;

/// Validate an email/password pair. Returns `Ok(())` or a user-facing
/// message naming the blank field.
pub fn validate_credentials(credentials: &Credentials) -> Result<(), String> {
    if credentials.email.trim().is_empty() {
        return Err("Email must not be empty".to_string());
    }
    if credentials.password.trim().is_empty() {
        return Err("Password must not be empty".to_string());
    }
    Ok(())
}

/// Validate a display name entered at registration.
pub fn validate_display_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Display name must not be empty".to_string());
    }
    Ok(())
}

/// Validate the title/date pair for a new task.
pub fn validate_task_input(title: &str, due_date: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Task title must not be empty".to_string());
    }
    if due_date.trim().is_empty() {
        return Err("Due date must not be empty".to_string());
    }
    Ok(())
}

/// Validate a group name before creation.
pub fn validate_group_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Group name must not be empty".to_string());
    }
    Ok(())
}

/// Validate a plan title before creation.
pub fn validate_plan_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Plan title must not be empty".to_string());
    }
    Ok(())
}

/// Validate the title/date pair for a new study step.
pub fn validate_step_input(title: &str, due_date: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Step title must not be empty".to_string());
    }
    if due_date.trim().is_empty() {
        return Err("Due date must not be empty".to_string());
    }
    Ok(())
}
