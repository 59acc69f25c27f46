//! sea-orm entities owned by the auth service.

pub mod accounts;
pub mod outbox_events;
pub mod password_reset_tokens;
pub mod two_factor_confirmations;
pub mod users;
pub mod verification_tokens;
