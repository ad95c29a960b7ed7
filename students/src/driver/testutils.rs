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

//! Test utilities for the business layer.

use crate::db::StudentsTx;
use crate::db::sqlite::SqliteStudentsTx;
use crate::driver::Driver;
use crate::model::*;
use roster_core::db::sqlite::{self, SqliteDb};
use roster_core::db::{BareTx, Db, init_schema};
use roster_core::model::EmailAddress;
use std::sync::Arc;

/// Builds the fields of a student with a fixed last name and no start date.
pub(crate) fn fields(first_name: &str, email: &str) -> StudentFields {
    StudentFields::new(
        StudentName::new(first_name).unwrap(),
        StudentName::new("Doe").unwrap(),
        EmailAddress::new(email).unwrap(),
        None,
    )
}

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver, for direct access to its contents.
    db: Arc<SqliteDb<SqliteStudentsTx>>,

    /// The driver under test.
    driver: Driver<SqliteDb<SqliteStudentsTx>>,
}

impl TestContext {
    /// Initializes a new driver backed by an empty in-memory SQLite database.
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(sqlite::testutils::setup::<SqliteStudentsTx>().await);
        init_schema(&*db).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Returns a new driver to issue a single operation.
    pub(crate) fn driver(&self) -> Driver<SqliteDb<SqliteStudentsTx>> {
        self.driver.clone()
    }

    /// Creates a student directly in the database.
    pub(crate) async fn create_student(&self, first_name: &str, email: &str) -> Student {
        let mut tx = self.db.begin().await.unwrap();
        let student = tx.create_student(&fields(first_name, email)).await.unwrap();
        tx.commit().await.unwrap();
        student
    }

    /// Gets a student directly from the database.
    pub(crate) async fn get_student(&self, id: StudentId) -> Student {
        let mut tx = self.db.begin().await.unwrap();
        tx.get_student(id).await.unwrap()
    }
}
