use super::*;

use tokio::sync::mpsc::error::TryRecvError;

async fn provider_with_ann() -> MemoryProvider {
    let provider = MemoryProvider::default();
    provider
        .create_account("ann@example.com", "secret1")
        .await
        .expect("account creation should succeed");
    provider
}

// =============================================================================
// normalize_email
// =============================================================================

#[test]
fn normalize_email_trims_and_lowercases() {
    assert_eq!(normalize_email("  Ann@Example.COM "), Some("ann@example.com".into()));
}

#[test]
fn normalize_email_rejects_bad_shapes() {
    for bad in ["", "ann", "@example.com", "ann@", "a@b@c"] {
        assert_eq!(normalize_email(bad), None, "should reject {bad:?}");
    }
}

// =============================================================================
// hash_password
// =============================================================================

#[test]
fn hash_password_is_stable() {
    assert_eq!(hash_password("secret1"), hash_password("secret1"));
}

#[test]
fn hash_password_differs_per_input() {
    assert_ne!(hash_password("secret1"), hash_password("secret2"));
}

#[test]
fn generate_reset_token_shape() {
    let token = generate_reset_token();
    assert_eq!(token.len(), 32);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

// =============================================================================
// create_account
// =============================================================================

#[tokio::test]
async fn create_account_signs_in_and_emits() {
    let provider = MemoryProvider::default();
    let mut events = provider.observe_session();
    assert_eq!(events.recv().await, Some(None), "restore snapshot should be signed out");

    let identity = provider
        .create_account("Ann@Example.com", "secret1")
        .await
        .expect("creation should succeed");
    assert_eq!(identity.email, "ann@example.com");
    assert_eq!(identity.display_name, None);

    let event = events.recv().await.expect("observer channel open");
    assert_eq!(event.map(|i| i.uid), Some(identity.uid));
}

#[tokio::test]
async fn create_account_rejects_duplicate_email() {
    let provider = provider_with_ann().await;
    let err = provider
        .create_account("ANN@example.com", "secret2")
        .await
        .expect_err("duplicate should fail");
    assert_eq!(err.code, "auth/email-already-in-use");
}

#[tokio::test]
async fn create_account_rejects_short_password() {
    let provider = MemoryProvider::default();
    let err = provider
        .create_account("ann@example.com", "short")
        .await
        .expect_err("weak password should fail");
    assert_eq!(err.code, "auth/weak-password");
}

#[tokio::test]
async fn create_account_rejects_malformed_email() {
    let provider = MemoryProvider::default();
    let err = provider
        .create_account("not-an-email", "secret1")
        .await
        .expect_err("malformed email should fail");
    assert_eq!(err.code, "auth/invalid-email");
}

// =============================================================================
// authenticate
// =============================================================================

#[tokio::test]
async fn authenticate_emits_signed_in_identity() {
    let provider = provider_with_ann().await;
    provider.end_session().await.expect("sign-out should succeed");

    let mut events = provider.observe_session();
    assert_eq!(events.recv().await, Some(None));

    provider
        .authenticate("ann@example.com", "secret1")
        .await
        .expect("sign-in should succeed");
    let event = events.recv().await.expect("observer channel open");
    assert_eq!(event.map(|i| i.email), Some("ann@example.com".into()));
}

#[tokio::test]
async fn authenticate_rejects_wrong_password_without_emitting() {
    let provider = provider_with_ann().await;
    let mut events = provider.observe_session();
    assert!(events.recv().await.is_some());

    let err = provider
        .authenticate("ann@example.com", "wrong-1")
        .await
        .expect_err("wrong password should fail");
    assert_eq!(err.code, "auth/invalid-credential");
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn authenticate_rejects_unknown_account() {
    let provider = MemoryProvider::default();
    let err = provider
        .authenticate("ghost@example.com", "secret1")
        .await
        .expect_err("unknown account should fail");
    assert_eq!(err.code, "auth/user-not-found");
}

// =============================================================================
// end_session
// =============================================================================

#[tokio::test]
async fn end_session_emits_signed_out() {
    let provider = provider_with_ann().await;
    let mut events = provider.observe_session();
    assert!(events.recv().await.expect("observer channel open").is_some());

    provider.end_session().await.expect("sign-out should succeed");
    assert_eq!(events.recv().await, Some(None));
}

// =============================================================================
// request_password_reset
// =============================================================================

#[tokio::test]
async fn password_reset_mints_token_without_emitting() {
    let provider = provider_with_ann().await;
    let mut events = provider.observe_session();
    assert!(events.recv().await.is_some());

    provider
        .request_password_reset("ann@example.com")
        .await
        .expect("reset request should succeed");
    let token = provider.reset_token("ann@example.com").expect("token should exist");
    assert_eq!(token.len(), 32);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn password_reset_rejects_unknown_account() {
    let provider = MemoryProvider::default();
    let err = provider
        .request_password_reset("ghost@example.com")
        .await
        .expect_err("unknown account should fail");
    assert_eq!(err.code, "auth/user-not-found");
}

// =============================================================================
// profile writes
// =============================================================================

#[tokio::test]
async fn set_display_name_emits_updated_identity() {
    let provider = MemoryProvider::default();
    let identity = provider
        .create_account("ann@example.com", "secret1")
        .await
        .expect("creation should succeed");

    let mut events = provider.observe_session();
    assert!(events.recv().await.is_some());

    provider
        .set_display_name(&identity.uid, "Ann")
        .await
        .expect("display name write should succeed");
    let event = events.recv().await.expect("observer channel open");
    assert_eq!(event.and_then(|i| i.display_name), Some("Ann".into()));
}

#[tokio::test]
async fn set_profile_attributes_overwrites_both_fields() {
    let provider = MemoryProvider::default();
    let identity = provider
        .create_account("ann@example.com", "secret1")
        .await
        .expect("creation should succeed");
    provider
        .set_display_name(&identity.uid, "Ann")
        .await
        .expect("display name write should succeed");

    let mut events = provider.observe_session();
    assert!(events.recv().await.is_some());

    let attrs = ProfileAttributes {
        display_name: Some("Bob".into()),
        photo_url: Some("https://example.com/bob.png".into()),
    };
    provider
        .set_profile_attributes(&identity.uid, attrs)
        .await
        .expect("profile write should succeed");

    let updated = events
        .recv()
        .await
        .expect("observer channel open")
        .expect("identity should still be signed in");
    assert_eq!(updated.display_name.as_deref(), Some("Bob"));
    assert_eq!(updated.photo_url.as_deref(), Some("https://example.com/bob.png"));
}

#[tokio::test]
async fn profile_write_on_unknown_uid_fails() {
    let provider = MemoryProvider::default();
    let err = provider
        .set_profile_attributes("ghost-uid", ProfileAttributes::default())
        .await
        .expect_err("unknown uid should fail");
    assert_eq!(err.code, "auth/user-not-found");
}

#[tokio::test]
async fn profile_write_while_signed_out_does_not_emit() {
    let provider = MemoryProvider::default();
    let identity = provider
        .create_account("ann@example.com", "secret1")
        .await
        .expect("creation should succeed");
    provider.end_session().await.expect("sign-out should succeed");

    let mut events = provider.observe_session();
    assert_eq!(events.recv().await, Some(None));

    provider
        .set_display_name(&identity.uid, "Ann")
        .await
        .expect("display name write should succeed");
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}
