//! # Navigation Guard
//!
//! Decides, before a navigation completes, whether it may proceed.
//!
//! ## Decision Flow
//!
//! ```text
//! requires auth? ──yes──► token? ──no──► RedirectTo(/login)
//!      │                    │
//!      │                   yes ──► verify ──ok──► sync default header, Proceed
//!      │                                   └─err─► clear store + header, RedirectTo(/login)
//!      no
//!      │
//! target is /login and token? ──yes──► verify ──ok──► RedirectTo(/)
//!      │                                       └─err─► Proceed (store untouched)
//!      no ──► Proceed
//! ```
//!
//! Every guarded navigation verifies remotely: no result caching, no retries.
//! When the verification resolves after a newer navigation has started, the
//! guard applies nothing and returns [`GuardDecision::Abort`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::app::routes::{RouteMatch, HOME_PATH, LOGIN_PATH};
use crate::core::service::AuthService;
use crate::services::api::CacheBusting;
use crate::storage::CredentialStore;

/// Outcome of one guard invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Continue to the target unmodified
    Proceed,
    /// Navigate to this path instead
    RedirectTo(String),
    /// The navigation was superseded; do nothing
    Abort,
}

/// Identifies one navigation among overlapping ones.
///
/// A ticket is current until the router issues a newer one.
#[derive(Debug, Clone)]
pub struct NavigationTicket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl NavigationTicket {
    pub(crate) fn new(id: u64, latest: Arc<AtomicU64>) -> Self {
        Self { id, latest }
    }

    /// A ticket nothing can supersede, for running a guard outside a router.
    pub fn detached() -> Self {
        Self::new(0, Arc::new(AtomicU64::new(0)))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }
}

/// One navigation attempt, alive for a single guard invocation.
#[derive(Debug, Clone)]
pub struct NavigationRequest<'a> {
    pub to: &'a RouteMatch,
    pub from: Option<&'a RouteMatch>,
    pub ticket: NavigationTicket,
}

/// Hook run before every navigation.
#[async_trait]
pub trait NavigationGuard: Send + Sync {
    async fn check(&self, request: &NavigationRequest<'_>) -> GuardDecision;
}

/// Authentication guard backed by remote token verification.
pub struct AuthGuard {
    auth: Arc<dyn AuthService>,
    store: Arc<dyn CredentialStore>,
}

impl AuthGuard {
    pub fn new(auth: Arc<dyn AuthService>, store: Arc<dyn CredentialStore>) -> Self {
        Self { auth, store }
    }

    async fn check_protected(&self, request: &NavigationRequest<'_>, token: Option<String>) -> GuardDecision {
        let Some(token) = token else {
            tracing::info!(path = %request.to.path, "No credential for protected route, redirecting to login");
            return GuardDecision::RedirectTo(LOGIN_PATH.to_string());
        };

        let result = self.auth.verify(&token, CacheBusting::NoCacheWithPragma).await;
        if !request.ticket.is_current() {
            tracing::debug!(path = %request.to.path, ticket = request.ticket.id(), "Navigation superseded during verification");
            return GuardDecision::Abort;
        }

        match result {
            Ok(identity) => {
                self.auth.set_default_authorization(&token);
                let user_id = identity.as_ref().map(|i| i.user_id.as_str());
                tracing::debug!(path = %request.to.path, user_id = ?user_id, "Credential verified");
                GuardDecision::Proceed
            }
            Err(e) => {
                self.store.clear();
                self.auth.clear_default_authorization();
                tracing::info!(path = %request.to.path, error = %e, "Credential rejected, redirecting to login");
                GuardDecision::RedirectTo(LOGIN_PATH.to_string())
            }
        }
    }

    // A stale credential is tolerated here: a failed verification lets the
    // login page render and leaves storage as it was.
    async fn check_login(&self, request: &NavigationRequest<'_>, token: &str) -> GuardDecision {
        let result = self.auth.verify(token, CacheBusting::NoCache).await;
        if !request.ticket.is_current() {
            return GuardDecision::Abort;
        }

        match result {
            Ok(_) => {
                tracing::info!("Already authenticated, redirecting login to home");
                GuardDecision::RedirectTo(HOME_PATH.to_string())
            }
            Err(e) => {
                tracing::debug!(error = %e, "Stored credential did not verify, showing login");
                GuardDecision::Proceed
            }
        }
    }
}

#[async_trait]
impl NavigationGuard for AuthGuard {
    async fn check(&self, request: &NavigationRequest<'_>) -> GuardDecision {
        let token = self.store.token();

        if request.to.requires_auth() {
            return self.check_protected(request, token).await;
        }

        if request.to.is_login() {
            if let Some(token) = token {
                return self.check_login(request, &token).await;
            }
        }

        GuardDecision::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::routes::RouteTable;
    use crate::core::error::ApiError;
    use crate::storage::{MemoryStore, StorageKey};
    use parking_lot::Mutex;
    use shared::VerifyResponse;

    /// Records verification calls and the default header slot.
    struct MockAuth {
        accept: bool,
        calls: Mutex<Vec<(String, CacheBusting)>>,
        default_header: Mutex<Option<String>>,
        // Simulates a newer navigation starting while verification is in flight
        supersede: Option<Arc<AtomicU64>>,
    }

    impl MockAuth {
        fn new(accept: bool) -> Self {
            Self {
                accept,
                calls: Mutex::new(Vec::new()),
                default_header: Mutex::new(None),
                supersede: None,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    #[async_trait]
    impl AuthService for MockAuth {
        async fn verify(&self, token: &str, cache: CacheBusting) -> Result<Option<VerifyResponse>, ApiError> {
            self.calls.lock().push((token.to_string(), cache));
            if let Some(latest) = &self.supersede {
                latest.fetch_add(1, Ordering::SeqCst);
            }
            if self.accept {
                Ok(Some(VerifyResponse {
                    user_id: "johndoe".to_string(),
                    role: Some("user".to_string()),
                }))
            } else {
                Err(ApiError::Status {
                    status: 500,
                    message: "verification unavailable".to_string(),
                })
            }
        }

        fn set_default_authorization(&self, token: &str) {
            *self.default_header.lock() = Some(shared::bearer(token));
        }

        fn clear_default_authorization(&self) {
            *self.default_header.lock() = None;
        }
    }

    fn seeded_store(token: Option<&str>) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        if let Some(token) = token {
            store.set(StorageKey::Token, token.to_string());
            store.set(StorageKey::User, r#"{"username":"johndoe"}"#.to_string());
        }
        store
    }

    async fn run(guard: &AuthGuard, path: &str, ticket: NavigationTicket) -> GuardDecision {
        let to = RouteTable::default().resolve(path);
        let request = NavigationRequest { to: &to, from: None, ticket };
        guard.check(&request).await
    }

    #[tokio::test]
    async fn test_protected_route_without_token_redirects_without_verifying() {
        let auth = Arc::new(MockAuth::new(true));
        let guard = AuthGuard::new(auth.clone(), seeded_store(None));

        for path in ["/", "/users", "/products"] {
            let decision = run(&guard, path, NavigationTicket::detached()).await;
            assert_eq!(decision, GuardDecision::RedirectTo("/login".to_string()));
        }
        assert_eq!(auth.call_count(), 0);
    }

    #[tokio::test]
    async fn test_protected_route_with_valid_token_proceeds_and_syncs_header() {
        let auth = Arc::new(MockAuth::new(true));
        let store = seeded_store(Some("abc"));
        let guard = AuthGuard::new(auth.clone(), store.clone());

        let decision = run(&guard, "/users", NavigationTicket::detached()).await;
        assert_eq!(decision, GuardDecision::Proceed);
        assert_eq!(auth.default_header.lock().as_deref(), Some("Bearer abc"));
        assert_eq!(
            auth.calls.lock().as_slice(),
            &[("abc".to_string(), CacheBusting::NoCacheWithPragma)]
        );
        assert_eq!(store.token(), Some("abc".to_string()));
    }

    #[tokio::test]
    async fn test_protected_route_with_rejected_token_clears_everything() {
        let auth = Arc::new(MockAuth::new(false));
        *auth.default_header.lock() = Some("Bearer abc".to_string());
        let store = seeded_store(Some("abc"));
        let guard = AuthGuard::new(auth.clone(), store.clone());

        let decision = run(&guard, "/products", NavigationTicket::detached()).await;
        assert_eq!(decision, GuardDecision::RedirectTo("/login".to_string()));
        assert_eq!(store.get(StorageKey::Token), None);
        assert_eq!(store.get(StorageKey::User), None);
        assert_eq!(*auth.default_header.lock(), None);
    }

    #[tokio::test]
    async fn test_login_with_valid_token_redirects_home() {
        let auth = Arc::new(MockAuth::new(true));
        let guard = AuthGuard::new(auth.clone(), seeded_store(Some("abc")));

        let decision = run(&guard, "/login", NavigationTicket::detached()).await;
        assert_eq!(decision, GuardDecision::RedirectTo("/".to_string()));
        assert_eq!(
            auth.calls.lock().as_slice(),
            &[("abc".to_string(), CacheBusting::NoCache)]
        );
    }

    #[tokio::test]
    async fn test_login_with_rejected_token_proceeds_and_keeps_storage() {
        let auth = Arc::new(MockAuth::new(false));
        let store = seeded_store(Some("stale"));
        let guard = AuthGuard::new(auth.clone(), store.clone());

        let decision = run(&guard, "/login", NavigationTicket::detached()).await;
        assert_eq!(decision, GuardDecision::Proceed);
        assert_eq!(store.token(), Some("stale".to_string()));
        assert!(store.get(StorageKey::User).is_some());
    }

    #[tokio::test]
    async fn test_login_without_token_proceeds_without_verifying() {
        let auth = Arc::new(MockAuth::new(true));
        let guard = AuthGuard::new(auth.clone(), seeded_store(None));

        assert_eq!(run(&guard, "/login", NavigationTicket::detached()).await, GuardDecision::Proceed);
        assert_eq!(auth.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_route_proceeds() {
        let auth = Arc::new(MockAuth::new(false));
        let guard = AuthGuard::new(auth.clone(), seeded_store(Some("abc")));

        assert_eq!(run(&guard, "/about", NavigationTicket::detached()).await, GuardDecision::Proceed);
        assert_eq!(auth.call_count(), 0);
    }

    #[tokio::test]
    async fn test_superseded_navigation_applies_no_side_effects() {
        let latest = Arc::new(AtomicU64::new(1));
        let mut mock = MockAuth::new(false);
        mock.supersede = Some(latest.clone());
        let auth = Arc::new(mock);
        *auth.default_header.lock() = Some("Bearer abc".to_string());
        let store = seeded_store(Some("abc"));
        let guard = AuthGuard::new(auth.clone(), store.clone());

        let decision = run(&guard, "/users", NavigationTicket::new(1, latest)).await;
        assert_eq!(decision, GuardDecision::Abort);
        assert_eq!(store.token(), Some("abc".to_string()));
        assert_eq!(auth.default_header.lock().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_ticket_currency() {
        let latest = Arc::new(AtomicU64::new(3));
        let ticket = NavigationTicket::new(3, latest.clone());
        assert!(ticket.is_current());

        latest.store(4, Ordering::SeqCst);
        assert!(!ticket.is_current());
        assert!(NavigationTicket::detached().is_current());
    }
}
