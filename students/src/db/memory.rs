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

//! In-memory implementation of the database abstraction for tests.

use crate::db::StudentsTx;
use crate::model::*;
use async_trait::async_trait;
use futures::lock::Mutex;
use roster_core::db::{BareTx, Db, DbError, DbResult};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Contents of the in-memory database.
#[derive(Clone, Default)]
struct State {
    /// Last identifier handed out to a student.  Never decreases so that identifiers of deleted
    /// students are not reused.
    last_id: i64,

    /// All students keyed by their identifier.
    students: BTreeMap<StudentId, Student>,
}

impl State {
    /// Fails if `fields` uses an email address that belongs to a student other than `id`.
    fn check_unique_email(&self, id: Option<StudentId>, fields: &StudentFields) -> DbResult<()> {
        let taken = self
            .students
            .values()
            .any(|student| Some(*student.id()) != id && student.email() == fields.email());
        if taken { Err(DbError::AlreadyExists) } else { Ok(()) }
    }
}

/// A database that keeps all data in memory.
///
/// Transactions operate on a private copy of the data that replaces the shared copy on commit,
/// so concurrent transactions behave as if the last one to commit won.
#[derive(Default)]
pub(crate) struct MemoryDb {
    /// Committed contents of the database.
    state: Arc<Mutex<State>>,
}

#[async_trait]
impl Db for MemoryDb {
    type Tx = MemoryTx;

    async fn begin(&self) -> DbResult<Self::Tx> {
        let state = self.state.lock().await.clone();
        Ok(MemoryTx { shared: self.state.clone(), state })
    }

    async fn close(&self) {}
}

/// A transaction against a `MemoryDb`.
pub(crate) struct MemoryTx {
    /// Committed contents of the database, updated on commit.
    shared: Arc<Mutex<State>>,

    /// Contents of the database as seen and modified by this transaction.
    state: State,
}

#[async_trait]
impl BareTx for MemoryTx {
    async fn commit(self) -> DbResult<()> {
        *self.shared.lock().await = self.state;
        Ok(())
    }

    async fn migrate(&mut self) -> DbResult<()> {
        Ok(())
    }
}

#[async_trait]
impl StudentsTx for MemoryTx {
    async fn get_students(&mut self) -> DbResult<Vec<Student>> {
        Ok(self.state.students.values().cloned().collect())
    }

    async fn get_student(&mut self, id: StudentId) -> DbResult<Student> {
        self.state.students.get(&id).cloned().ok_or(DbError::NotFound)
    }

    async fn create_student(&mut self, fields: &StudentFields) -> DbResult<Student> {
        self.state.check_unique_email(None, fields)?;

        self.state.last_id += 1;
        let id = StudentId::new(self.state.last_id);
        let student = Student::new(id, fields.clone());
        self.state.students.insert(id, student.clone());
        Ok(student)
    }

    async fn update_student(&mut self, id: StudentId, fields: &StudentFields) -> DbResult<()> {
        if !self.state.students.contains_key(&id) {
            return Err(DbError::NotFound);
        }
        self.state.check_unique_email(Some(id), fields)?;

        self.state.students.insert(id, Student::new(id, fields.clone()));
        Ok(())
    }

    async fn delete_student(&mut self, id: StudentId) -> DbResult<()> {
        match self.state.students.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DbError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::generate_db_tests;

    generate_db_tests!(MemoryDb::default());
}
