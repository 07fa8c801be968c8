//! Integration tests for `AccountRepo`: CRUD, identifier resolution, and
//! lockout bookkeeping.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use vfix_db::models::account::CreateAccount;
use vfix_db::repositories::AccountRepo;

fn create_input(email: &str, username: &str) -> CreateAccount {
    CreateAccount {
        email: email.to_string(),
        username: username.to_string(),
        password_hash: Some("$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string()),
        full_name: None,
        role: "user".to_string(),
        gdpr_consent: true,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find(pool: PgPool) {
    let input = create_input("alice@test.com", "alice");
    let created = AccountRepo::create(&pool, &input).await.unwrap();

    assert_eq!(created.email, "alice@test.com");
    assert_eq!(created.role, "user");
    assert!(created.is_active);
    assert_eq!(created.failed_login_count, 0);
    assert!(created.locked_until.is_none());

    let by_id = AccountRepo::find_by_id(&pool, created.id).await.unwrap();
    assert_eq!(by_id.unwrap().username, "alice");

    let by_email = AccountRepo::find_by_email(&pool, "alice@test.com")
        .await
        .unwrap();
    assert!(by_email.is_some());

    let missing = AccountRepo::find_by_email(&pool, "ghost@test.com")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_identifier_prefers_email(pool: PgPool) {
    AccountRepo::create(&pool, &create_input("alice@test.com", "alice"))
        .await
        .unwrap();
    // Second account whose username equals the first account's email local part.
    AccountRepo::create(&pool, &create_input("bob@test.com", "bob"))
        .await
        .unwrap();

    let by_email = AccountRepo::find_by_identifier(&pool, "alice@test.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.username, "alice");

    let by_username = AccountRepo::find_by_identifier(&pool, "bob")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_username.email, "bob@test.com");

    let missing = AccountRepo::find_by_identifier(&pool, "nobody")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_violates_unique_constraint(pool: PgPool) {
    AccountRepo::create(&pool, &create_input("dup@test.com", "dup_one"))
        .await
        .unwrap();

    let err = AccountRepo::create(&pool, &create_input("dup@test.com", "dup_two"))
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_accounts_email"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_exists_by_email_or_username(pool: PgPool) {
    AccountRepo::create(&pool, &create_input("alice@test.com", "alice"))
        .await
        .unwrap();

    assert!(
        AccountRepo::exists_by_email_or_username(&pool, "alice@test.com", "other")
            .await
            .unwrap()
    );
    assert!(
        AccountRepo::exists_by_email_or_username(&pool, "other@test.com", "alice")
            .await
            .unwrap()
    );
    assert!(
        !AccountRepo::exists_by_email_or_username(&pool, "other@test.com", "other")
            .await
            .unwrap()
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_attempts_and_lockout(pool: PgPool) {
    let account = AccountRepo::create(&pool, &create_input("lock@test.com", "lock"))
        .await
        .unwrap();

    // Four plain failures: counter climbs, no lockout.
    for _ in 0..4 {
        AccountRepo::record_failed_attempt(&pool, account.id, None)
            .await
            .unwrap();
    }
    let row = AccountRepo::find_by_id(&pool, account.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.failed_login_count, 4);
    assert!(row.locked_until.is_none());

    // Fifth failure carries the lock deadline in the same statement.
    let until = Utc::now() + Duration::minutes(30);
    AccountRepo::record_failed_attempt(&pool, account.id, Some(until))
        .await
        .unwrap();
    let row = AccountRepo::find_by_id(&pool, account.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.failed_login_count, 5);
    assert!(row.locked_until.is_some());
    assert!(row.lockout_remaining_minutes(Utc::now()).is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_successful_login_resets_counters(pool: PgPool) {
    let account = AccountRepo::create(&pool, &create_input("reset@test.com", "reset"))
        .await
        .unwrap();

    let until = Utc::now() + Duration::minutes(30);
    AccountRepo::record_failed_attempt(&pool, account.id, Some(until))
        .await
        .unwrap();

    AccountRepo::record_successful_login(&pool, account.id)
        .await
        .unwrap();

    let row = AccountRepo::find_by_id(&pool, account.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.failed_login_count, 0);
    assert!(row.locked_until.is_none());
    assert!(row.last_login_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clear_lockout_preserves_last_login(pool: PgPool) {
    let account = AccountRepo::create(&pool, &create_input("clear@test.com", "clear"))
        .await
        .unwrap();

    let until = Utc::now() + Duration::minutes(30);
    AccountRepo::record_failed_attempt(&pool, account.id, Some(until))
        .await
        .unwrap();

    AccountRepo::clear_lockout(&pool, account.id).await.unwrap();

    let row = AccountRepo::find_by_id(&pool, account.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.failed_login_count, 0);
    assert!(row.locked_until.is_none());
    assert!(row.last_login_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_password_and_deactivate(pool: PgPool) {
    let account = AccountRepo::create(&pool, &create_input("pw@test.com", "pw"))
        .await
        .unwrap();

    let updated = AccountRepo::update_password(&pool, account.id, "$argon2id$new")
        .await
        .unwrap();
    assert!(updated);
    let row = AccountRepo::find_by_id(&pool, account.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.password_hash.as_deref(), Some("$argon2id$new"));

    assert!(AccountRepo::deactivate(&pool, account.id).await.unwrap());
    // Already-inactive account reports false, not an error.
    assert!(!AccountRepo::deactivate(&pool, account.id).await.unwrap());

    assert!(!AccountRepo::update_password(&pool, 999_999, "x").await.unwrap());
}
