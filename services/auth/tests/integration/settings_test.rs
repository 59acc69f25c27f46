use uuid::Uuid;

use tats_auth::error::AuthServiceError;
use tats_auth::usecase::password::verify_password;
use tats_auth::usecase::settings::{
    SettingsOutcome, UpdateSettingsInput, UpdateSettingsUseCase,
};

use crate::helpers::{MockTokenRepo, MockUserRepo, TEST_PASSWORD, verified_user};

#[tokio::test]
async fn should_update_name() {
    let user = verified_user("maria@tats.example");
    let user_id = user.id;
    let user_repo = MockUserRepo::new(vec![user]);
    let users = user_repo.users_handle();

    let uc = UpdateSettingsUseCase {
        users: user_repo,
        verification_tokens: MockTokenRepo::empty(),
    };

    let outcome = uc
        .execute(
            user_id,
            UpdateSettingsInput {
                name: Some("Maria Q.".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome, SettingsOutcome::Updated);
    assert_eq!(users.lock().unwrap()[0].name, "Maria Q.");
}

#[tokio::test]
async fn should_reject_update_with_no_fields() {
    let user = verified_user("maria@tats.example");
    let user_id = user.id;

    let uc = UpdateSettingsUseCase {
        users: MockUserRepo::new(vec![user]),
        verification_tokens: MockTokenRepo::empty(),
    };

    let result = uc.execute(user_id, UpdateSettingsInput::default()).await;
    assert!(matches!(result, Err(AuthServiceError::MissingData)));
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_identity() {
    let uc = UpdateSettingsUseCase {
        users: MockUserRepo::empty(),
        verification_tokens: MockTokenRepo::empty(),
    };

    let result = uc
        .execute(
            Uuid::now_v7(),
            UpdateSettingsInput {
                name: Some("x".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AuthServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_require_current_password_for_password_change() {
    let user = verified_user("maria@tats.example");
    let user_id = user.id;

    let uc = UpdateSettingsUseCase {
        users: MockUserRepo::new(vec![user]),
        verification_tokens: MockTokenRepo::empty(),
    };

    let missing = uc
        .execute(
            user_id,
            UpdateSettingsInput {
                new_password: Some("brand-new-password".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(missing, Err(AuthServiceError::MissingData)));

    let wrong = uc
        .execute(
            user_id,
            UpdateSettingsInput {
                current_password: Some("not-the-password".to_owned()),
                new_password: Some("brand-new-password".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(wrong, Err(AuthServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_change_password_with_correct_current() {
    let user = verified_user("maria@tats.example");
    let user_id = user.id;
    let user_repo = MockUserRepo::new(vec![user]);
    let users = user_repo.users_handle();

    let uc = UpdateSettingsUseCase {
        users: user_repo,
        verification_tokens: MockTokenRepo::empty(),
    };

    uc.execute(
        user_id,
        UpdateSettingsInput {
            current_password: Some(TEST_PASSWORD.to_owned()),
            new_password: Some("brand-new-password".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let stored = users.lock().unwrap()[0].password_hash.clone().unwrap();
    assert!(verify_password("brand-new-password", &stored));
}

#[tokio::test]
async fn should_reset_verification_on_email_change() {
    let user = verified_user("maria@tats.example");
    let user_id = user.id;
    let user_repo = MockUserRepo::new(vec![user]);
    let users = user_repo.users_handle();

    let token_repo = MockTokenRepo::empty();
    let tokens = token_repo.tokens_handle();

    let uc = UpdateSettingsUseCase {
        users: user_repo,
        verification_tokens: token_repo,
    };

    let outcome = uc
        .execute(
            user_id,
            UpdateSettingsInput {
                email: Some("maria.new@tats.example".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome, SettingsOutcome::ConfirmationSent);
    let updated = users.lock().unwrap();
    assert_eq!(updated[0].email, "maria.new@tats.example");
    assert!(updated[0].email_verified.is_none());

    let issued = tokens.lock().unwrap();
    assert_eq!(issued.len(), 1);
    assert_eq!(issued[0].email, "maria.new@tats.example");
}

#[tokio::test]
async fn should_reject_taken_email() {
    let user = verified_user("maria@tats.example");
    let other = verified_user("jose@tats.example");
    let user_id = user.id;

    let uc = UpdateSettingsUseCase {
        users: MockUserRepo::new(vec![user, other]),
        verification_tokens: MockTokenRepo::empty(),
    };

    let result = uc
        .execute(
            user_id,
            UpdateSettingsInput {
                email: Some("jose@tats.example".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AuthServiceError::EmailTaken)));
}

#[tokio::test]
async fn should_toggle_two_factor() {
    let user = verified_user("maria@tats.example");
    let user_id = user.id;
    let user_repo = MockUserRepo::new(vec![user]);
    let users = user_repo.users_handle();

    let uc = UpdateSettingsUseCase {
        users: user_repo,
        verification_tokens: MockTokenRepo::empty(),
    };

    uc.execute(
        user_id,
        UpdateSettingsInput {
            two_factor_enabled: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(users.lock().unwrap()[0].two_factor_enabled);
}
