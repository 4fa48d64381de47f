use std::{error::Error, fmt::Debug};

use diesel::{r2d2::ConnectionManager, PgConnection};
use r2d2::{Pool, PooledConnection};
use thiserror::Error;

use crate::telemetry::spawn_blocking_with_tracing;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

// Walks the source chain so bunyan log lines carry the full error story,
// not just the top-level message
pub fn write_error_chain(f: &mut std::fmt::Formatter<'_>, source: &Option<impl Error>) -> std::fmt::Result{
    let Some(error) = source else {
        return Ok(())
    };

    write!(f, "\n\tCaused By:\n\t{:?}", error)?;
    write_error_chain(f, &error.source())
}

// r2d2's get() blocks while the pool is saturated, so it runs on the
// blocking threadpool like every diesel call
pub async fn get_pooled_connection(
    pool: &DbPool
) -> Result<DbConnection, PoolCheckoutError>{
    let pool = pool.clone();

    let conn = spawn_blocking_with_tracing(move || {
        pool.get()
    })
    .await??;

    Ok(conn)
}

#[derive(Error)]
pub enum PoolCheckoutError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to check out a database connection from the pool")]
    PoolExhaustedError(#[from] r2d2::Error),
}

impl Debug for PoolCheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        write_error_chain(f, &self.source())
    }
}
