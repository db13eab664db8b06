//! Shared setup for controller integration tests: a stub backend, a
//! gateway pointed at it, and an on-disk session store in a temp dir.

use std::sync::Arc;

use studycircle_app::{LoginController, RegisterController};
use studycircle_gateway::{BackendGateway, GatewayConfig};
use studycircle_session::SessionStore;
use studycircle_test_support::{StubBackend, API_KEY};

pub struct TestApp {
    pub backend: StubBackend,
    pub gateway: Arc<BackendGateway>,
    pub session: Arc<SessionStore>,
    _dir: tempfile::TempDir,
}

pub async fn app() -> TestApp {
    let backend = StubBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let session =
        Arc::new(SessionStore::open(&dir.path().join("session.redb")).expect("session store"));
    let gateway = Arc::new(BackendGateway::new(GatewayConfig::new(
        backend.base_url.clone(),
        API_KEY,
    )));

    TestApp {
        backend,
        gateway,
        session,
        _dir: dir,
    }
}

impl TestApp {
    /// Register an account and complete the first sign-in.
    pub async fn register_and_sign_in(&self, name: &str, email: &str, password: &str) {
        RegisterController::new(self.gateway.clone(), self.session.clone())
            .register(name, email, password)
            .await
            .expect("registration");
        LoginController::new(self.gateway.clone(), self.session.clone())
            .sign_in(email, password)
            .await
            .expect("sign-in");
    }

    /// The signed-in user id from the session.
    pub fn user_id(&self) -> String {
        self.session.user_id().unwrap().expect("signed in")
    }
}
