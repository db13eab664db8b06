use studycircle_gateway::GatewayError;
use studycircle_session::SessionStoreError;

/// Errors surfaced by screen controllers.
///
/// `Unauthenticated` is the one the navigation layer must treat
/// specially: it means route to the login flow. Everything else renders
/// as a transient user-visible notice; nothing here is fatal and nothing
/// is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// A required session field is missing, or the backend refused the
    /// stored token. The caller routes to the login flow.
    #[error("not signed in")]
    Unauthenticated,

    /// Local input validation failed before any request was sent.
    #[error("{0}")]
    Invalid(String),

    /// A gateway call failed (network, backend rejection, decode).
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The local session store failed.
    #[error(transparent)]
    Session(#[from] SessionStoreError),
}

/// Map a gateway failure to the controller-level outcome: auth failures
/// route to the login flow, everything else becomes a notice.
pub(crate) fn route_or_notice(err: GatewayError) -> ControllerError {
    match err {
        GatewayError::Auth { .. } => ControllerError::Unauthenticated,
        other => ControllerError::Gateway(other),
    }
}
