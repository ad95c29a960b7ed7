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

//! Test utilities for the REST API.

use crate::db::StudentsTx;
use crate::db::memory::MemoryDb;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use roster_core::db::{BareTx, Db, DbError};
use roster_core::model::EmailAddress;
use std::sync::Arc;
use time::Date;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app, for direct access to its contents.
    db: Arc<MemoryDb>,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes a new app backed by an empty in-memory database.
    pub(crate) async fn setup() -> Self {
        let _can_fail = env_logger::builder().is_test(true).try_init();

        let db = Arc::new(MemoryDb::default());
        let driver = Driver::new(db.clone());
        let app = app(driver);
        Self { db, app }
    }

    /// Returns a copy of the app to send a single request to it.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app to send a single request to it.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Creates a student directly in the database.
    pub(crate) async fn create_student(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        start_date: Option<Date>,
    ) -> Student {
        let fields = StudentFields::new(
            StudentName::new(first_name).unwrap(),
            StudentName::new(last_name).unwrap(),
            EmailAddress::new(email).unwrap(),
            start_date,
        );
        let mut tx = self.db.begin().await.unwrap();
        let student = tx.create_student(&fields).await.unwrap();
        tx.commit().await.unwrap();
        student
    }

    /// Gets a student directly from the database, or `None` if it does not exist.
    pub(crate) async fn get_student(&self, id: StudentId) -> Option<Student> {
        let mut tx = self.db.begin().await.unwrap();
        match tx.get_student(id).await {
            Ok(student) => Some(student),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("Unexpected database error: {}", e),
        }
    }

    /// Gets all students directly from the database.
    pub(crate) async fn get_students(&self) -> Vec<Student> {
        let mut tx = self.db.begin().await.unwrap();
        tx.get_students().await.unwrap()
    }
}
