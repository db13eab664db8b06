//! One controller per use case.

pub mod dashboard;
pub mod groups;
pub mod login;
pub mod plan_browser;
pub mod planner;
pub mod register;
pub mod steps;
pub mod tasks;

use studycircle_session::SessionStore;

use crate::error::ControllerError;

/// Read the token and user id every signed-in screen needs. Missing
/// either one routes the activation to the login flow.
pub(crate) fn signed_in(session: &SessionStore) -> Result<(String, String), ControllerError> {
    let token = session
        .access_token()?
        .ok_or(ControllerError::Unauthenticated)?;
    let user_id = session.user_id()?.ok_or(ControllerError::Unauthenticated)?;
    Ok((token, user_id))
}
