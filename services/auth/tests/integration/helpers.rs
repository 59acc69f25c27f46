use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use tats_auth::domain::repository::{
    AccountRepository, EmailTokenRepository, OutboxRepository, TwoFactorConfirmationRepository,
    UserRepository,
};
use tats_auth::domain::types::{
    AuthUser, EmailToken, OauthAccount, OutboxEvent, TwoFactorConfirmation,
};
use tats_auth::error::AuthServiceError;
use tats_auth::usecase::password::hash_password;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-integration-tests";

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<AuthUser>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<AuthUser>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<AuthUser>>> {
        Arc::clone(&self.users)
    }

    fn update<F: FnOnce(&mut AuthUser)>(&self, id: Uuid, f: F) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            f(user);
            user.updated_at = Utc::now();
        }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(&self, user: &AuthUser) -> Result<(), AuthServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn set_email_verified(
        &self,
        id: Uuid,
        at: chrono::DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        self.update(id, |u| u.email_verified = Some(at));
        Ok(())
    }

    async fn set_password_hash(&self, id: Uuid, hash: &str) -> Result<(), AuthServiceError> {
        let hash = hash.to_owned();
        self.update(id, |u| u.password_hash = Some(hash));
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        image: Option<&str>,
    ) -> Result<(), AuthServiceError> {
        let name = name.map(str::to_owned);
        let image = image.map(str::to_owned);
        self.update(id, |u| {
            if let Some(name) = name {
                u.name = name;
            }
            if let Some(image) = image {
                u.image = Some(image);
            }
        });
        Ok(())
    }

    async fn set_two_factor_enabled(
        &self,
        id: Uuid,
        enabled: bool,
    ) -> Result<(), AuthServiceError> {
        self.update(id, |u| u.two_factor_enabled = enabled);
        Ok(())
    }

    async fn change_email(&self, id: Uuid, email: &str) -> Result<(), AuthServiceError> {
        let email = email.to_owned();
        self.update(id, |u| {
            u.email = email;
            u.email_verified = None;
        });
        Ok(())
    }
}

// ── MockTokenRepo ────────────────────────────────────────────────────────────

/// In-memory email-token table; doubles for verification and reset tokens.
pub struct MockTokenRepo {
    pub tokens: Arc<Mutex<Vec<EmailToken>>>,
    pub events: Arc<Mutex<Vec<OutboxEvent>>>,
}

impl MockTokenRepo {
    pub fn new(tokens: Vec<EmailToken>) -> Self {
        Self {
            tokens: Arc::new(Mutex::new(tokens)),
            events: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn tokens_handle(&self) -> Arc<Mutex<Vec<EmailToken>>> {
        Arc::clone(&self.tokens)
    }

    pub fn events_handle(&self) -> Arc<Mutex<Vec<OutboxEvent>>> {
        Arc::clone(&self.events)
    }
}

impl EmailTokenRepository for MockTokenRepo {
    async fn replace_for_email(
        &self,
        token: &EmailToken,
        event: &OutboxEvent,
    ) -> Result<(), AuthServiceError> {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.retain(|t| t.email != token.email);
        tokens.push(token.clone());
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<EmailToken>, AuthServiceError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token == token)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AuthServiceError> {
        self.tokens.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }
}

// ── MockTwoFactorRepo ────────────────────────────────────────────────────────

pub struct MockTwoFactorRepo {
    pub rows: Arc<Mutex<Vec<TwoFactorConfirmation>>>,
}

impl MockTwoFactorRepo {
    pub fn empty() -> Self {
        Self {
            rows: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn with_confirmation_for(user_id: Uuid) -> Self {
        Self {
            rows: Arc::new(Mutex::new(vec![TwoFactorConfirmation {
                id: Uuid::new_v4(),
                user_id,
                created_at: Utc::now(),
            }])),
        }
    }

    pub fn rows_handle(&self) -> Arc<Mutex<Vec<TwoFactorConfirmation>>> {
        Arc::clone(&self.rows)
    }
}

impl TwoFactorConfirmationRepository for MockTwoFactorRepo {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<TwoFactorConfirmation>, AuthServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user_id == user_id)
            .cloned())
    }

    async fn create(&self, user_id: Uuid) -> Result<TwoFactorConfirmation, AuthServiceError> {
        let confirmation = TwoFactorConfirmation {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(confirmation.clone());
        Ok(confirmation)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AuthServiceError> {
        self.rows.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

// ── MockAccountRepo ──────────────────────────────────────────────────────────

pub struct MockAccountRepo {
    pub accounts: Arc<Mutex<Vec<OauthAccount>>>,
}

impl MockAccountRepo {
    pub fn new(accounts: Vec<OauthAccount>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn accounts_handle(&self) -> Arc<Mutex<Vec<OauthAccount>>> {
        Arc::clone(&self.accounts)
    }
}

impl AccountRepository for MockAccountRepo {
    async fn find_by_provider(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<OauthAccount>, AuthServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.provider == provider && a.provider_account_id == provider_account_id)
            .cloned())
    }

    async fn create(&self, account: &OauthAccount) -> Result<(), AuthServiceError> {
        self.accounts.lock().unwrap().push(account.clone());
        Ok(())
    }
}

// ── MockOutboxRepo ───────────────────────────────────────────────────────────

pub struct MockOutboxRepo {
    pub events: Arc<Mutex<Vec<OutboxEvent>>>,
}

impl MockOutboxRepo {
    pub fn empty() -> Self {
        Self {
            events: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn events_handle(&self) -> Arc<Mutex<Vec<OutboxEvent>>> {
        Arc::clone(&self.events)
    }
}

impl OutboxRepository for MockOutboxRepo {
    async fn enqueue(&self, event: &OutboxEvent) -> Result<(), AuthServiceError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const TEST_PASSWORD: &str = "station-operator-1";

pub fn verified_user(email: &str) -> AuthUser {
    let now = Utc::now();
    AuthUser {
        id: Uuid::now_v7(),
        name: "Maria Quispe".to_owned(),
        email: email.to_owned(),
        password_hash: Some(hash_password(TEST_PASSWORD).unwrap()),
        email_verified: Some(now),
        role: 0,
        two_factor_enabled: false,
        image: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn unverified_user(email: &str) -> AuthUser {
    AuthUser {
        email_verified: None,
        ..verified_user(email)
    }
}

pub fn oauth_only_user(email: &str) -> AuthUser {
    AuthUser {
        password_hash: None,
        ..verified_user(email)
    }
}

pub fn expired_token(email: &str) -> EmailToken {
    EmailToken {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        token: "ExpiredExpiredExpiredExpiredExpiredExpired000000".to_owned(),
        expires_at: Utc::now() - chrono::Duration::minutes(5),
        created_at: Utc::now() - chrono::Duration::hours(2),
    }
}

pub fn live_token(email: &str, value: &str) -> EmailToken {
    EmailToken {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        token: value.to_owned(),
        expires_at: Utc::now() + chrono::Duration::hours(1),
        created_at: Utc::now(),
    }
}
