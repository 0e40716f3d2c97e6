//! Direct Postgres store backend

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use tracing::{debug, info};

use common::decimal::Price;
use common::error::{Error, Result};
use common::model::{OrderStatus, PendingOrder};

use super::{PriceStore, PROCESS_PENDING_ORDERS};

/// Store backend using a Postgres connection pool
pub struct PostgresPriceStore {
    pool: PgPool,
}

/// Return shape of a stored function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReturnShape {
    Void,
    Single,
    Set,
}

impl PostgresPriceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, pool_size: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(pool_size)
            .connect(database_url)
            .await
            .map_err(Error::Database)?;

        info!("Connected to PostgreSQL database");

        Ok(Self::new(pool))
    }

    async fn return_shape(&self, function: &str) -> Result<ReturnShape> {
        let row = sqlx::query(
            "SELECT p.proretset AS returns_set, p.prorettype = 'void'::regtype AS returns_void
             FROM pg_proc p
             WHERE p.oid = to_regproc($1)"
        )
        .bind(function)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        // Unknown or overloaded names fall through to the single-value call,
        // which reports the database's own error.
        let Some(row) = row else {
            return Ok(ReturnShape::Single);
        };

        let returns_set: bool = row.try_get("returns_set").map_err(store_error)?;
        let returns_void: bool = row.try_get("returns_void").map_err(store_error)?;
        Ok(match (returns_set, returns_void) {
            (_, true) => ReturnShape::Void,
            (true, false) => ReturnShape::Set,
            (false, false) => ReturnShape::Single,
        })
    }
}

/// Database errors carry the server's message unchanged
pub(crate) fn store_error(err: sqlx::Error) -> Error {
    match err {
        sqlx::Error::Database(db) => Error::Store(db.message().to_string()),
        other => Error::Database(other),
    }
}

#[async_trait]
impl PriceStore for PostgresPriceStore {
    async fn fetch_pending_orders(&self) -> Result<Vec<PendingOrder>> {
        let rows = sqlx::query(
            "SELECT symbol, order_type::text AS order_type
             FROM transactions
             WHERE status::text = $1
             ORDER BY symbol"
        )
        .bind(OrderStatus::Pending.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        debug!("Fetched {} pending orders", rows.len());

        rows.iter()
            .map(|row| -> Result<PendingOrder> {
                Ok(PendingOrder {
                    symbol: row.try_get("symbol").map_err(store_error)?,
                    order_type: row.try_get("order_type").map_err(store_error)?,
                })
            })
            .collect()
    }

    async fn update_price(&self, symbol: &str, price: Price) -> Result<()> {
        sqlx::query("SELECT update_current_price(p_symbol => $1, p_price => $2)")
            .bind(symbol)
            .bind(price)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(())
    }

    async fn process_pending_orders(&self) -> Result<Value> {
        // Mirror the REST API: void is null, a set is an array, anything else
        // is its JSON value.
        let result: Option<Value> = match self.return_shape(PROCESS_PENDING_ORDERS).await? {
            ReturnShape::Void => {
                sqlx::query("SELECT process_pending_orders()")
                    .execute(&self.pool)
                    .await
                    .map_err(store_error)?;
                None
            }
            ReturnShape::Set => {
                sqlx::query_scalar(
                    "SELECT COALESCE(jsonb_agg(to_jsonb(r)), '[]'::jsonb)
                     FROM process_pending_orders() AS r"
                )
                .fetch_one(&self.pool)
                .await
                .map_err(store_error)?
            }
            ReturnShape::Single => {
                sqlx::query_scalar("SELECT to_jsonb(r) FROM process_pending_orders() AS r")
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(store_error)?
                    .flatten()
            }
        };

        Ok(result.unwrap_or(Value::Null))
    }
}
