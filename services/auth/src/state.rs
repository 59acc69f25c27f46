use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbAccountRepository, DbOutboxRepository, DbPasswordResetTokenRepository,
    DbTwoFactorConfirmationRepository, DbUserRepository, DbVerificationTokenRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub cookie_domain: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn verification_token_repo(&self) -> DbVerificationTokenRepository {
        DbVerificationTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn password_reset_token_repo(&self) -> DbPasswordResetTokenRepository {
        DbPasswordResetTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn two_factor_repo(&self) -> DbTwoFactorConfirmationRepository {
        DbTwoFactorConfirmationRepository {
            db: self.db.clone(),
        }
    }

    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn outbox_repo(&self) -> DbOutboxRepository {
        DbOutboxRepository {
            db: self.db.clone(),
        }
    }
}
