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

//! Implementation of the database abstraction using PostgreSQL.

use crate::db::StudentsTx;
use crate::model::*;
use async_trait::async_trait;
use futures::TryStreamExt;
use roster_core::db::postgres::{map_sqlx_error, run_schema};
use roster_core::db::{BareTx, DbError, DbResult};
use roster_core::model::EmailAddress;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row, Transaction};
use time::Date;

/// Schema to use to initialize the production database.
const SCHEMA: &str = include_str!("postgres.sql");

/// Converts a `row` from the `students` table into a `Student`, revalidating its contents.
fn student_from_row(row: PgRow) -> DbResult<Student> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let first_name: String = row.try_get("first_name").map_err(map_sqlx_error)?;
    let last_name: String = row.try_get("last_name").map_err(map_sqlx_error)?;
    let email: String = row.try_get("email").map_err(map_sqlx_error)?;
    let start_date: Option<Date> = row.try_get("start_date").map_err(map_sqlx_error)?;

    Ok(Student::new(
        StudentId::new(id),
        StudentFields::new(
            StudentName::new(first_name)?,
            StudentName::new(last_name)?,
            EmailAddress::new(email)?,
            start_date,
        ),
    ))
}

/// A transaction backed by a PostgreSQL database.
pub(crate) struct PostgresStudentsTx {
    /// Inner transaction type to obtain access to the raw sqlx transaction.
    tx: Transaction<'static, Postgres>,
}

impl From<Transaction<'static, Postgres>> for PostgresStudentsTx {
    fn from(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl BareTx for PostgresStudentsTx {
    async fn commit(self) -> DbResult<()> {
        self.tx.commit().await.map_err(map_sqlx_error)
    }

    async fn migrate(&mut self) -> DbResult<()> {
        run_schema(&mut self.tx, SCHEMA).await
    }
}

#[async_trait]
impl StudentsTx for PostgresStudentsTx {
    async fn get_students(&mut self) -> DbResult<Vec<Student>> {
        let query_str = "
            SELECT id, first_name, last_name, email, start_date
            FROM students
            ORDER BY id
        ";
        let mut rows = sqlx::query(query_str).fetch(&mut *self.tx);

        let mut students = vec![];
        while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
            students.push(student_from_row(row)?);
        }
        Ok(students)
    }

    async fn get_student(&mut self, id: StudentId) -> DbResult<Student> {
        let query_str = "
            SELECT id, first_name, last_name, email, start_date
            FROM students
            WHERE id = $1
        ";
        let row = sqlx::query(query_str)
            .bind(id.as_i64())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        student_from_row(row)
    }

    async fn create_student(&mut self, fields: &StudentFields) -> DbResult<Student> {
        let query_str = "
            INSERT INTO students (first_name, last_name, email, start_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        ";
        let row = sqlx::query(query_str)
            .bind(fields.first_name().as_str())
            .bind(fields.last_name().as_str())
            .bind(fields.email().as_str())
            .bind(fields.start_date())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        Ok(Student::new(StudentId::new(id), fields.clone()))
    }

    async fn update_student(&mut self, id: StudentId, fields: &StudentFields) -> DbResult<()> {
        let query_str = "
            UPDATE students
            SET first_name = $1, last_name = $2, email = $3, start_date = $4
            WHERE id = $5
        ";
        let done = sqlx::query(query_str)
            .bind(fields.first_name().as_str())
            .bind(fields.last_name().as_str())
            .bind(fields.email().as_str())
            .bind(fields.start_date())
            .bind(id.as_i64())
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        match done.rows_affected() {
            0 => Err(DbError::NotFound),
            1 => Ok(()),
            _ => Err(DbError::BackendError("Update affected more than one row".to_owned())),
        }
    }

    async fn delete_student(&mut self, id: StudentId) -> DbResult<()> {
        let query_str = "DELETE FROM students WHERE id = $1";
        let done = sqlx::query(query_str)
            .bind(id.as_i64())
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        match done.rows_affected() {
            0 => Err(DbError::NotFound),
            1 => Ok(()),
            _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
        }
    }
}
