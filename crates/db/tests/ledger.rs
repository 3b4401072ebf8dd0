//! Integration tests for the credit balance and history repositories.

use lumen_core::credits::{CreditBalance, DEFAULT_FREE_CREDITS};
use lumen_db::models::history::CreateHistoryEntry;
use lumen_db::models::user::CreateUser;
use lumen_db::repositories::{CreditRepo, HistoryRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, email: &str) -> i64 {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

async fn create_balance(pool: &PgPool, user_id: i64, free: i32, paid: i32) {
    CreditRepo::get_or_create(pool, user_id, free).await.unwrap();
    sqlx::query("UPDATE user_credits SET paid_credits = $2 WHERE user_id = $1")
        .bind(user_id)
        .bind(paid)
        .execute(pool)
        .await
        .unwrap();
}

fn history_input(user_id: i64, prompt: &str) -> CreateHistoryEntry {
    CreateHistoryEntry {
        user_id,
        prompt: prompt.to_string(),
        image_url: "https://cdn.example.com/out.png".to_string(),
        original_image_url: None,
        media_type: "image".to_string(),
        task_type: "lighting_adjustment".to_string(),
        confidence: 0.9,
        generation_time_ms: 1200,
        model_used: "Gemini 2.5 Flash Image".to_string(),
        resolution: "1024x1024".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Credits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn balance_is_created_lazily_with_default_allotment(pool: PgPool) {
    let user_id = create_user(&pool, "lazy@test.com").await;

    assert!(CreditRepo::find_by_user(&pool, user_id).await.unwrap().is_none());

    let credits = CreditRepo::get_or_create(&pool, user_id, DEFAULT_FREE_CREDITS)
        .await
        .unwrap();
    assert_eq!(credits.balance(), CreditBalance::new(DEFAULT_FREE_CREDITS, 0));

    // Second access returns the same row instead of resetting it.
    CreditRepo::deduct_one(&pool, user_id).await.unwrap();
    let again = CreditRepo::get_or_create(&pool, user_id, DEFAULT_FREE_CREDITS)
        .await
        .unwrap();
    assert_eq!(again.free_credits, DEFAULT_FREE_CREDITS - 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deduct_consumes_free_before_paid(pool: PgPool) {
    let user_id = create_user(&pool, "free-first@test.com").await;
    create_balance(&pool, user_id, 1, 5).await;

    let after = CreditRepo::deduct_one(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(after.balance(), CreditBalance::new(0, 5));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deduct_falls_back_to_paid(pool: PgPool) {
    let user_id = create_user(&pool, "paid@test.com").await;
    create_balance(&pool, user_id, 0, 3).await;

    let after = CreditRepo::deduct_one(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(after.balance(), CreditBalance::new(0, 2));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deduct_on_empty_balance_is_a_no_op(pool: PgPool) {
    let user_id = create_user(&pool, "empty@test.com").await;
    CreditRepo::get_or_create(&pool, user_id, 0).await.unwrap();

    assert!(CreditRepo::deduct_one(&pool, user_id).await.unwrap().is_none());

    let credits = CreditRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(credits.balance(), CreditBalance::new(0, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stored_deduction_matches_balance_arithmetic(pool: PgPool) {
    for (i, (free, paid)) in [(3, 0), (1, 5), (0, 4), (0, 1), (0, 0)].into_iter().enumerate() {
        let user_id = create_user(&pool, &format!("rule-{i}@test.com")).await;
        create_balance(&pool, user_id, free, paid).await;

        let stored = CreditRepo::deduct_one(&pool, user_id)
            .await
            .unwrap()
            .map(|row| row.balance());
        assert_eq!(stored, CreditBalance::new(free, paid).deduct_one(), "({free}, {paid})");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_deductions_do_not_lose_updates(pool: PgPool) {
    let user_id = create_user(&pool, "race@test.com").await;
    CreditRepo::get_or_create(&pool, user_id, 10).await.unwrap();

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move { CreditRepo::deduct_one(&pool, user_id).await })
        })
        .collect();
    for task in tasks {
        assert!(task.await.unwrap().unwrap().is_some());
    }

    let credits = CreditRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(credits.balance(), CreditBalance::new(0, 0));
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn history_lists_newest_first_and_is_scoped_to_user(pool: PgPool) {
    let alice = create_user(&pool, "alice@test.com").await;
    let bob = create_user(&pool, "bob@test.com").await;

    HistoryRepo::create(&pool, &history_input(alice, "first")).await.unwrap();
    HistoryRepo::create(&pool, &history_input(alice, "second")).await.unwrap();
    HistoryRepo::create(&pool, &history_input(bob, "other")).await.unwrap();

    let entries = HistoryRepo::list_for_user(&pool, alice, 10, 0).await.unwrap();
    let prompts: Vec<_> = entries.iter().map(|e| e.prompt.as_str()).collect();
    assert_eq!(prompts, ["second", "first"]);
    assert_eq!(HistoryRepo::count_for_user(&pool, alice).await.unwrap(), 2);
    assert_eq!(HistoryRepo::count_for_user(&pool, bob).await.unwrap(), 1);
}
