//! Shared setup for gateway integration tests.

use studycircle_core::Credentials;
use studycircle_gateway::{BackendGateway, GatewayConfig};
use studycircle_test_support::{StubBackend, API_KEY};

/// Spawn a stub backend and a gateway pointed at it.
pub async fn gateway() -> (StubBackend, BackendGateway) {
    let backend = StubBackend::spawn().await;
    let config = GatewayConfig::new(backend.base_url.clone(), API_KEY);
    (backend, BackendGateway::new(config))
}

/// Spawn a stub backend with one registered, signed-in account.
/// Returns the backend, the gateway, the bearer token, and the user id.
pub async fn signed_in() -> (StubBackend, BackendGateway, String, String) {
    let (backend, gateway) = gateway().await;
    let credentials = Credentials::new("student@example.com", "correct-horse");

    gateway.register(&credentials).await.expect("registration");
    let token = gateway.login(&credentials).await.expect("login");
    let identity = gateway
        .fetch_current_user(&token)
        .await
        .expect("current user");

    (backend, gateway, token, identity.id)
}
