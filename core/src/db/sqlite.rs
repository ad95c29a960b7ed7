// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Common utilities to interact with an SQLite database.

use crate::db::{BareTx, Db, DbError, DbResult};
use async_trait::async_trait;
use futures::lock::Mutex;
use log::warn;
use sqlx::Transaction;
use sqlx::sqlite::{Sqlite, SqlitePool};
use std::marker::PhantomData;

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::RowNotFound => DbError::NotFound,
        e if e.to_string().contains("UNIQUE constraint failed") => DbError::AlreadyExists,
        e => DbError::BackendError(e.to_string()),
    }
}

/// A database backed by SQLite that hands out transactions of type `T`.
pub struct SqliteDb<T> {
    /// Shared SQLite connection pool.  This is a cloneable type that all concurrent
    /// transactions can use concurrently.
    pool: SqlitePool,

    /// Marker for the type of the transactions returned by `begin`.
    _tx: PhantomData<fn() -> T>,
}

impl<T> Drop for SqliteDb<T> {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("Dropping connection without having called close() first");
        }
    }
}

#[async_trait]
impl<T> Db for SqliteDb<T>
where
    T: BareTx + From<Mutex<Transaction<'static, Sqlite>>> + 'static,
{
    type Tx = T;

    async fn begin(&self) -> DbResult<T> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(T::from(Mutex::from(tx)))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Helper function to initialize the database with a `schema`, which may contain more than one
/// statement.
pub async fn run_schema(
    tx: &mut Mutex<Transaction<'static, Sqlite>>,
    schema: &str,
) -> DbResult<()> {
    let mut tx = tx.lock().await;
    sqlx::Executor::execute(&mut **tx, sqlx::raw_sql(schema)).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Test utilities for the SQLite connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    use sqlx::sqlite::SqlitePoolOptions;

    /// Initializes the test database.
    ///
    /// The pool is limited to a single connection so that a transaction dropped by a test is
    /// fully rolled back before the next one can start.
    pub async fn setup<T>() -> SqliteDb<T> {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        let pool = SqlitePoolOptions::new().max_connections(1).connect(":memory:").await.unwrap();
        SqliteDb { pool, _tx: PhantomData }
    }
}
