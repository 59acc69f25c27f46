use chrono::Utc;
use uuid::Uuid;

use tats_auth::domain::types::OauthAccount;
use tats_auth::error::AuthServiceError;
use tats_auth::usecase::oauth::{LinkOauthInput, LinkOauthUseCase};

use crate::helpers::{MockAccountRepo, MockUserRepo, TEST_JWT_SECRET, verified_user};

fn google_input(email: &str) -> LinkOauthInput {
    LinkOauthInput {
        provider: "google".to_owned(),
        provider_account_id: "g-1001".to_owned(),
        email: email.to_owned(),
        name: "Maria Quispe".to_owned(),
        image: None,
    }
}

#[tokio::test]
async fn should_create_verified_user_on_first_link() {
    let user_repo = MockUserRepo::empty();
    let users = user_repo.users_handle();
    let account_repo = MockAccountRepo::empty();
    let accounts = account_repo.accounts_handle();

    let uc = LinkOauthUseCase {
        users: user_repo,
        accounts: account_repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let out = uc.execute(google_input("maria@tats.example")).await.unwrap();
    assert!(!out.access_token.is_empty());

    let created = users.lock().unwrap();
    assert_eq!(created.len(), 1);
    // The provider attested the address, so the account starts verified and
    // carries no password.
    assert!(created[0].email_verified.is_some());
    assert!(created[0].password_hash.is_none());
    assert_eq!(accounts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_sign_in_existing_linked_account_without_duplicating_user() {
    let user = verified_user("maria@tats.example");
    let link = OauthAccount {
        id: Uuid::new_v4(),
        user_id: user.id,
        provider: "google".to_owned(),
        provider_account_id: "g-1001".to_owned(),
        created_at: Utc::now(),
    };

    let user_repo = MockUserRepo::new(vec![user]);
    let users = user_repo.users_handle();

    let uc = LinkOauthUseCase {
        users: user_repo,
        accounts: MockAccountRepo::new(vec![link]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let out = uc.execute(google_input("maria@tats.example")).await.unwrap();
    assert!(!out.refresh_token.is_empty());
    assert_eq!(users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_refuse_link_when_email_belongs_to_credential_account() {
    let user = verified_user("maria@tats.example");

    let uc = LinkOauthUseCase {
        users: MockUserRepo::new(vec![user]),
        accounts: MockAccountRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = uc.execute(google_input("maria@tats.example")).await;
    assert!(matches!(result, Err(AuthServiceError::EmailTaken)));
}

#[tokio::test]
async fn should_reject_link_without_provider_identity() {
    let uc = LinkOauthUseCase {
        users: MockUserRepo::empty(),
        accounts: MockAccountRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = uc
        .execute(LinkOauthInput {
            provider: " ".to_owned(),
            provider_account_id: String::new(),
            email: "maria@tats.example".to_owned(),
            name: "Maria".to_owned(),
            image: None,
        })
        .await;
    assert!(matches!(result, Err(AuthServiceError::MissingData)));
}
