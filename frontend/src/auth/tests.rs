use super::*;
use crate::error::SessionError;
use crate::store::MemoryTokenStore;
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// =========================================================
// Shared Mock Components
// =========================================================

#[derive(Default)]
struct BackendState {
    /// token -> profile returned by /me
    profiles: RefCell<HashMap<String, User>>,
    /// username -> (password, issued token)
    accounts: RefCell<HashMap<String, (String, String)>>,
    /// Operation log to verify calling order
    log: RefCell<Vec<String>>,
}

#[derive(Clone, Default)]
struct MockSessionApi {
    state: Rc<BackendState>,
}

impl MockSessionApi {
    fn with_profile(self, token: &str, user: User) -> Self {
        self.state
            .profiles
            .borrow_mut()
            .insert(token.to_string(), user);
        self
    }

    fn with_account(self, username: &str, password: &str, token: &str) -> Self {
        self.state
            .accounts
            .borrow_mut()
            .insert(username.to_string(), (password.to_string(), token.to_string()));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.state.log.borrow().clone()
    }
}

#[async_trait(?Send)]
impl SessionApi for MockSessionApi {
    async fn authenticate(&self, username: &str, password: &str) -> SessionResult<AuthToken> {
        self.state.log.borrow_mut().push(format!("authenticate:{}", username));
        match self.state.accounts.borrow().get(username) {
            Some((expected, token)) if expected == password => Ok(AuthToken::new(token.as_str())),
            _ => Err(SessionError::InvalidCredentials),
        }
    }

    async fn fetch_profile(&self, token: &str) -> SessionResult<User> {
        self.state.log.borrow_mut().push(format!("fetch_profile:{}", token));
        self.state
            .profiles
            .borrow()
            .get(token)
            .cloned()
            .ok_or(SessionError::InvalidToken)
    }

    async fn register(&self, username: &str, _email: &str, _password: &str) -> SessionResult<()> {
        self.state.log.borrow_mut().push(format!("register:{}", username));
        Ok(())
    }
}

/// A store whose backing storage is unreachable
struct UnavailableStore;

impl TokenStore for UnavailableStore {
    fn save(&self, _token: &str) -> SessionResult<()> {
        Err(SessionError::StorageUnavailable("disabled".into()))
    }

    fn load(&self) -> SessionResult<Option<String>> {
        Err(SessionError::StorageUnavailable("disabled".into()))
    }

    fn clear(&self) -> SessionResult<()> {
        Err(SessionError::StorageUnavailable("disabled".into()))
    }
}

fn al() -> User {
    User {
        id: 1,
        username: "al".into(),
        email: "a@x.com".into(),
        role: Role::User,
    }
}

fn admin() -> User {
    User {
        id: 2,
        username: "root".into(),
        email: "root@x.com".into(),
        role: Role::Admin,
    }
}

// =========================================================
// Initial state
// =========================================================

#[test]
fn new_session_is_initializing_and_unauthenticated() {
    let session = Session::new();
    assert_eq!(session.phase(), SessionPhase::Initializing);
    assert!(!session.is_authenticated());
    assert!(session.user.is_none());
    assert!(session.role().is_none());
}

#[test]
fn authenticated_implies_user_present() {
    let session = Session::authenticated(AuthToken::new("abc"), al());
    assert!(session.is_authenticated());
    assert!(session.user.is_some());

    let no_token = Session {
        token: String::new(),
        ..session
    };
    assert!(!no_token.is_authenticated());
}

// =========================================================
// Restore-on-load
// =========================================================

#[tokio::test]
async fn restore_without_stored_token_is_anonymous() {
    let store = MemoryTokenStore::new();
    let api = MockSessionApi::default();

    let session = restore(&store, &api).await;

    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert!(api.calls().is_empty(), "no network call without a token");
}

#[tokio::test]
async fn restore_with_valid_token_authenticates() {
    let store = MemoryTokenStore::with_token("abc");
    let api = MockSessionApi::default().with_profile("abc", al());

    let session = restore(&store, &api).await;

    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert_eq!(session.token, "abc");
    assert_eq!(session.user, Some(al()));
    assert_eq!(store.load().unwrap().as_deref(), Some("abc"));
    assert_eq!(api.calls(), vec!["fetch_profile:abc"]);
}

#[tokio::test]
async fn rejected_token_is_cleared_and_session_is_anonymous() {
    for token in ["expired", "garbage", "abc "] {
        let store = MemoryTokenStore::with_token(token);
        let api = MockSessionApi::default().with_profile("abc", al());

        let session = restore(&store, &api).await;

        assert!(!session.is_authenticated());
        assert!(!session.initializing);
        assert_eq!(store.load().unwrap(), None, "token {:?} must be cleared", token);
    }
}

#[tokio::test]
async fn unavailable_storage_restores_to_anonymous() {
    let api = MockSessionApi::default();
    let session = restore(&UnavailableStore, &api).await;
    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn late_restore_does_not_override_explicit_login() {
    let store = MemoryTokenStore::with_token("old");
    let api = MockSessionApi::default().with_profile("old", admin());

    let mut live = Session::new();
    live.login(&store, AuthToken::new("fresh"), al()).unwrap();

    let restored = restore(&MemoryTokenStore::with_token("old"), &api).await;
    assert!(!live.apply_restored(restored));
    assert_eq!(live.user, Some(al()));
    assert_eq!(live.token, "fresh");
}

#[test]
fn restore_result_applies_while_initializing() {
    let mut live = Session::new();
    assert!(live.apply_restored(Session::anonymous()));
    assert_eq!(live.phase(), SessionPhase::Anonymous);
}

// =========================================================
// login / logout
// =========================================================

#[test]
fn login_persists_token_and_authenticates() {
    let store = MemoryTokenStore::new();
    let mut session = Session::anonymous();

    session.login(&store, AuthToken::new("abc"), al()).unwrap();

    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert_eq!(session.role(), Some(Role::User));
    assert_eq!(store.load().unwrap().as_deref(), Some("abc"));
}

#[test]
fn login_is_idempotent() {
    let store_once = MemoryTokenStore::new();
    let mut once = Session::anonymous();
    once.login(&store_once, AuthToken::new("abc"), al()).unwrap();

    let store_twice = MemoryTokenStore::new();
    let mut twice = Session::anonymous();
    twice.login(&store_twice, AuthToken::new("abc"), al()).unwrap();
    twice.login(&store_twice, AuthToken::new("abc"), al()).unwrap();

    assert_eq!(once, twice);
    assert_eq!(store_once.load().unwrap(), store_twice.load().unwrap());
}

#[test]
fn login_overwrites_an_existing_session() {
    let store = MemoryTokenStore::new();
    let mut session = Session::anonymous();
    session.login(&store, AuthToken::new("abc"), al()).unwrap();
    session.login(&store, AuthToken::new("xyz"), admin()).unwrap();

    assert_eq!(session.role(), Some(Role::Admin));
    assert_eq!(store.load().unwrap().as_deref(), Some("xyz"));
}

#[test]
fn login_with_unavailable_storage_still_authenticates() {
    let mut session = Session::anonymous();
    let result = session.login(&UnavailableStore, AuthToken::new("abc"), al());

    assert!(matches!(result, Err(SessionError::StorageUnavailable(_))));
    assert!(session.is_authenticated());
}

#[test]
fn logout_clears_store_and_state() {
    let store = MemoryTokenStore::new();
    let mut session = Session::anonymous();
    session.login(&store, AuthToken::new("abc"), al()).unwrap();

    session.logout(&store).unwrap();

    assert_eq!(session, Session::anonymous());
    assert_eq!(store.load().unwrap(), None);

    // Anonymous -> Anonymous
    session.logout(&store).unwrap();
    assert_eq!(session, Session::anonymous());
}

#[test]
fn logout_resets_state_even_when_storage_fails() {
    let mut session = Session::authenticated(AuthToken::new("abc"), al());
    assert!(session.logout(&UnavailableStore).is_err());
    assert!(!session.is_authenticated());
}

// =========================================================
// sign_in
// =========================================================

#[tokio::test]
async fn sign_in_exchanges_credentials_then_fetches_profile() {
    let api = MockSessionApi::default()
        .with_account("al", "pw", "abc")
        .with_profile("abc", al());

    let (token, user) = sign_in(&api, "al", "pw").await.unwrap();

    assert_eq!(token.token, "abc");
    assert_eq!(user, al());
    assert_eq!(api.calls(), vec!["authenticate:al", "fetch_profile:abc"]);
}

#[tokio::test]
async fn sign_in_with_wrong_password_leaves_session_anonymous() {
    let api = MockSessionApi::default()
        .with_account("al", "pw", "abc")
        .with_profile("abc", al());
    let session = Session::anonymous();

    let err = sign_in(&api, "al", "wrong").await.unwrap_err();

    assert_eq!(err, SessionError::InvalidCredentials);
    assert_eq!(err.login_message(), "Login failed. Invalid username or password.");
    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert_eq!(api.calls(), vec!["authenticate:al"]);
}
