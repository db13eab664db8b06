//! Registration screen.

use std::sync::Arc;

use studycircle_core::validation::{validate_credentials, validate_display_name};
use studycircle_core::Credentials;
use studycircle_gateway::BackendGateway;
use studycircle_session::SessionStore;

use crate::error::ControllerError;

/// Drives account registration.
///
/// On success the chosen display name is stored in the session as
/// pending; the first successful login turns it into a profile row.
pub struct RegisterController {
    gateway: Arc<BackendGateway>,
    session: Arc<SessionStore>,
}

impl RegisterController {
    pub fn new(gateway: Arc<BackendGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// Submit a registration.
    ///
    /// Only non-empty checks happen locally; password strength and email
    /// uniqueness are the backend's rules and come back as
    /// `GatewayError::Validation` with the backend's message (weak
    /// password vs. already-registered email).
    pub async fn register(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ControllerError> {
        validate_display_name(display_name).map_err(ControllerError::Invalid)?;
        let credentials = Credentials::new(email.trim(), password);
        validate_credentials(&credentials).map_err(ControllerError::Invalid)?;

        self.gateway.register(&credentials).await?;
        self.session.set_pending_display_name(display_name.trim())?;

        tracing::info!(email = %credentials.email, "Registration submitted");
        Ok(())
    }
}
