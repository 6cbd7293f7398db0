//! Demo: walks the register → logout → guarded-navigation flow against the
//! in-memory provider.

use std::sync::Arc;

use authgate::{AuthGuard, GuardDecision, MemoryProvider, Navigator, SessionManager};

struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, route: &str) {
        tracing::info!(route, "redirecting");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let provider = Arc::new(MemoryProvider::default());
    let manager = SessionManager::new(provider);
    let guard = AuthGuard::new(manager.subscribe(), "/login");
    let navigator = LogNavigator;

    manager
        .register("ann@example.com", "Ann", "secret1")
        .await
        .expect("registration failed");

    let mut sessions = manager.subscribe();
    let session = sessions
        .wait_for(|s| matches!(s, Some(s) if s.user().is_some_and(|u| u.display_name.is_some())))
        .await
        .expect("session stream closed")
        .clone();
    println!("{}", serde_json::to_string_pretty(&session).expect("session serializes"));

    let decision = guard.check(&navigator).await;
    tracing::info!(?decision, "navigation while signed in");
    assert_eq!(decision, GuardDecision::Allowed);

    manager.logout().await.expect("logout failed");
    sessions
        .wait_for(|s| matches!(s, Some(s) if !s.is_authenticated()))
        .await
        .expect("session stream closed");

    let decision = guard.check(&navigator).await;
    tracing::info!(?decision, "navigation after sign-out");
    assert_eq!(decision, GuardDecision::Denied);
}
