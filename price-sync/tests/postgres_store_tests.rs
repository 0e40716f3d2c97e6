use common::error::Error;
use common::model::PendingOrder;
use price_sync::{PostgresPriceStore, PriceStore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::test;

use dotenv::dotenv;

// PostgreSQL integration tests for the direct store backend
// These tests require a running PostgreSQL database
// Run with: cargo test --test postgres_store_tests -- --ignored

const BASE_SCHEMA: &[&str] = &[
    "CREATE TABLE transactions (symbol text NOT NULL, order_type text, status text NOT NULL)",
    "CREATE TABLE current_prices (symbol text PRIMARY KEY, price numeric NOT NULL)",
    "CREATE FUNCTION update_current_price(p_symbol text, p_price numeric) RETURNS void
     LANGUAGE sql AS $$
        INSERT INTO current_prices (symbol, price) VALUES (p_symbol, p_price)
        ON CONFLICT (symbol) DO UPDATE SET price = EXCLUDED.price
     $$",
];

/// Each test runs in its own schema so the procedure signatures can differ.
async fn create_test_store(schema: &str, statements: &[&str]) -> (PostgresPriceStore, PgPool) {
    dotenv().ok(); // Load .env.test if it exists

    let database_url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set to run PostgreSQL tests");

    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");
    sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", schema))
        .execute(&admin)
        .await
        .unwrap();
    sqlx::query(&format!("CREATE SCHEMA {}", schema))
        .execute(&admin)
        .await
        .unwrap();

    let search_path = format!("SET search_path TO {}", schema);
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                sqlx::query(&search_path).execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    for statement in statements {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }

    (PostgresPriceStore::new(pool.clone()), pool)
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_fetch_pending_orders() {
    let (store, pool) = create_test_store("price_sync_fetch", BASE_SCHEMA).await;
    sqlx::query(
        "INSERT INTO transactions (symbol, order_type, status) VALUES
         ('TSLA', 'buy', 'pending'),
         ('AAPL', 'sell', 'pending'),
         ('AAPL', 'buy', 'pending'),
         ('MSFT', 'buy', 'completed')"
    )
    .execute(&pool)
    .await
    .unwrap();

    let orders = store.fetch_pending_orders().await.unwrap();

    let symbols: Vec<&str> = orders.iter().map(|o| o.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAPL", "AAPL", "TSLA"]);
    assert!(orders.contains(&PendingOrder::new("TSLA", "buy")));
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_update_price() {
    let (store, pool) = create_test_store("price_sync_update", BASE_SCHEMA).await;

    store.update_price("BTCUSDT", dec!(64250.5)).await.unwrap();
    store.update_price("BTCUSDT", dec!(64300.25)).await.unwrap();

    let price: Decimal = sqlx::query_scalar("SELECT price FROM current_prices WHERE symbol = $1")
        .bind("BTCUSDT")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(price, dec!(64300.25));
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_process_returns_json_value() {
    let mut statements = BASE_SCHEMA.to_vec();
    statements.push(
        "CREATE FUNCTION process_pending_orders() RETURNS jsonb
         LANGUAGE sql AS $$ SELECT '{\"executed\": 2, \"skipped\": 1}'::jsonb $$",
    );
    let (store, _pool) = create_test_store("price_sync_process_jsonb", &statements).await;

    let result = store.process_pending_orders().await.unwrap();

    assert_eq!(result, json!({"executed": 2, "skipped": 1}));
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_process_returns_scalar() {
    let mut statements = BASE_SCHEMA.to_vec();
    statements.push(
        "CREATE FUNCTION process_pending_orders() RETURNS integer
         LANGUAGE sql AS $$ SELECT 3 $$",
    );
    let (store, _pool) = create_test_store("price_sync_process_scalar", &statements).await;

    let result = store.process_pending_orders().await.unwrap();

    assert_eq!(result, json!(3));
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_process_returns_rows() {
    let mut statements = BASE_SCHEMA.to_vec();
    statements.push(
        "CREATE FUNCTION process_pending_orders() RETURNS TABLE (symbol text, executed boolean)
         LANGUAGE sql AS $$ VALUES ('AAPL', true), ('TSLA', false) $$",
    );
    let (store, _pool) = create_test_store("price_sync_process_rows", &statements).await;

    let result = store.process_pending_orders().await.unwrap();

    assert_eq!(
        result,
        json!([
            {"symbol": "AAPL", "executed": true},
            {"symbol": "TSLA", "executed": false}
        ])
    );
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_process_returns_no_rows() {
    let mut statements = BASE_SCHEMA.to_vec();
    statements.push(
        "CREATE FUNCTION process_pending_orders() RETURNS SETOF transactions
         LANGUAGE sql AS $$ SELECT * FROM transactions WHERE false $$",
    );
    let (store, _pool) = create_test_store("price_sync_process_empty", &statements).await;

    let result = store.process_pending_orders().await.unwrap();

    assert_eq!(result, json!([]));
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_process_returns_void() {
    let mut statements = BASE_SCHEMA.to_vec();
    statements.push(
        "CREATE FUNCTION process_pending_orders() RETURNS void
         LANGUAGE sql AS $$ DELETE FROM transactions WHERE status = 'pending' $$",
    );
    let (store, pool) = create_test_store("price_sync_process_void", &statements).await;
    sqlx::query("INSERT INTO transactions (symbol, order_type, status) VALUES ('AAPL', 'buy', 'pending')")
        .execute(&pool)
        .await
        .unwrap();

    let result = store.process_pending_orders().await.unwrap();

    assert_eq!(result, serde_json::Value::Null);
    let remaining: i64 = sqlx::query_scalar("SELECT count(*) FROM transactions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_error_message_is_verbatim() {
    let (store, _pool) = create_test_store("price_sync_missing_table", &[]).await;

    let err = store.fetch_pending_orders().await.unwrap_err();

    assert!(matches!(err, Error::Store(_)));
    assert_eq!(err.to_string(), "relation \"transactions\" does not exist");
}
