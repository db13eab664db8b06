use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studycircle_app::{group_row, DashboardController, ListPresenter, ScreenState};
use studycircle_gateway::{BackendGateway, GatewayConfig};
use studycircle_session::SessionStore;

/// Headless smoke entry point: open the stored session and render the
/// dashboard listing, or report that a sign-in is needed.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studycircle_app=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Loaded gateway configuration");

    let session_path =
        std::env::var("SESSION_DB_PATH").unwrap_or_else(|_| "studycircle-session.redb".into());
    let session = Arc::new(SessionStore::open(Path::new(&session_path))?);
    let gateway = Arc::new(BackendGateway::new(config));

    let mut dashboard = DashboardController::new(gateway, session);
    if dashboard.activate().await.is_err() {
        println!("Not signed in. Sign in from the app first.");
        return Ok(());
    }

    match dashboard.state() {
        ScreenState::Ready(groups) => {
            let mut presenter = ListPresenter::new(group_row);
            presenter.update(groups.clone());
            if presenter.is_empty() {
                println!("No group memberships yet.");
            } else {
                for row in presenter.rows() {
                    println!("{row}");
                }
            }
        }
        ScreenState::Error(message) => println!("Could not load groups: {message}"),
        ScreenState::Loading => unreachable!("activate() always leaves Loading"),
    }

    Ok(())
}
