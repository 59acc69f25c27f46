use tats_auth::error::AuthServiceError;
use tats_auth::usecase::verification::{ConsumeVerificationUseCase, ResendVerificationUseCase};

use crate::helpers::{
    MockTokenRepo, MockUserRepo, expired_token, live_token, unverified_user, verified_user,
};

#[tokio::test]
async fn should_verify_email_and_delete_token() {
    let user = unverified_user("maria@tats.example");
    let user_repo = MockUserRepo::new(vec![user]);
    let users = user_repo.users_handle();

    let token_repo = MockTokenRepo::new(vec![live_token("maria@tats.example", "TOKEN-A")]);
    let tokens = token_repo.tokens_handle();

    let uc = ConsumeVerificationUseCase {
        users: user_repo,
        verification_tokens: token_repo,
    };

    uc.execute("TOKEN-A").await.unwrap();

    assert!(users.lock().unwrap()[0].email_verified.is_some());
    assert!(tokens.lock().unwrap().is_empty(), "token row must be gone");
}

#[tokio::test]
async fn should_fail_on_unknown_token() {
    let uc = ConsumeVerificationUseCase {
        users: MockUserRepo::empty(),
        verification_tokens: MockTokenRepo::empty(),
    };

    let result = uc.execute("NO-SUCH-TOKEN").await;
    assert!(matches!(result, Err(AuthServiceError::TokenNotFound)));
}

#[tokio::test]
async fn should_reject_expired_token_regardless_of_match() {
    let user = unverified_user("maria@tats.example");
    let stale = expired_token("maria@tats.example");
    let token_value = stale.token.clone();

    let token_repo = MockTokenRepo::new(vec![stale]);
    let tokens = token_repo.tokens_handle();
    let user_repo = MockUserRepo::new(vec![user]);
    let users = user_repo.users_handle();

    let uc = ConsumeVerificationUseCase {
        users: user_repo,
        verification_tokens: token_repo,
    };

    let result = uc.execute(&token_value).await;
    assert!(matches!(result, Err(AuthServiceError::TokenExpired)));

    // Expired rows are swept on sight and the account stays unverified.
    assert!(tokens.lock().unwrap().is_empty());
    assert!(users.lock().unwrap()[0].email_verified.is_none());
}

#[tokio::test]
async fn should_not_allow_double_consumption() {
    let user = unverified_user("maria@tats.example");
    let token_repo = MockTokenRepo::new(vec![live_token("maria@tats.example", "TOKEN-A")]);

    let uc = ConsumeVerificationUseCase {
        users: MockUserRepo::new(vec![user]),
        verification_tokens: token_repo,
    };

    uc.execute("TOKEN-A").await.unwrap();
    let second = uc.execute("TOKEN-A").await;
    assert!(matches!(second, Err(AuthServiceError::TokenNotFound)));
}

#[tokio::test]
async fn should_keep_exactly_one_live_token_across_resends() {
    let user = unverified_user("maria@tats.example");
    let token_repo = MockTokenRepo::empty();
    let tokens = token_repo.tokens_handle();

    let uc = ResendVerificationUseCase {
        users: MockUserRepo::new(vec![user]),
        verification_tokens: token_repo,
    };

    uc.execute("maria@tats.example").await.unwrap();
    let first = tokens.lock().unwrap()[0].token.clone();

    uc.execute("maria@tats.example").await.unwrap();

    let remaining = tokens.lock().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_ne!(remaining[0].token, first);
}

#[tokio::test]
async fn should_silently_ignore_resend_for_unknown_email() {
    let token_repo = MockTokenRepo::empty();
    let tokens = token_repo.tokens_handle();

    let uc = ResendVerificationUseCase {
        users: MockUserRepo::empty(),
        verification_tokens: token_repo,
    };

    uc.execute("nobody@tats.example").await.unwrap();
    assert!(tokens.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_silently_ignore_resend_for_verified_account() {
    let user = verified_user("maria@tats.example");
    let token_repo = MockTokenRepo::empty();
    let tokens = token_repo.tokens_handle();

    let uc = ResendVerificationUseCase {
        users: MockUserRepo::new(vec![user]),
        verification_tokens: token_repo,
    };

    uc.execute("maria@tats.example").await.unwrap();
    assert!(tokens.lock().unwrap().is_empty());
}
