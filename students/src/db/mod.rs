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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::*;
use async_trait::async_trait;
use roster_core::db::{BareTx, DbResult};

#[cfg(test)]
pub(crate) mod memory;
pub(crate) mod postgres;
#[cfg(test)]
pub(crate) mod sqlite;

/// A transaction with high-level operations that deal with our types.
#[async_trait]
pub(crate) trait StudentsTx: BareTx {
    /// Gets all existing students ordered by their identifier.
    async fn get_students(&mut self) -> DbResult<Vec<Student>>;

    /// Gets the student identified by `id`.
    async fn get_student(&mut self, id: StudentId) -> DbResult<Student>;

    /// Creates a new student with the given `fields` and returns it with its assigned identifier.
    ///
    /// Fails with `AlreadyExists` if another student already uses the same email address.
    async fn create_student(&mut self, fields: &StudentFields) -> DbResult<Student>;

    /// Replaces all mutable fields of the student identified by `id` with `fields`.
    ///
    /// Fails with `NotFound` if the student does not exist and with `AlreadyExists` if another
    /// student already uses the new email address.
    async fn update_student(&mut self, id: StudentId, fields: &StudentFields) -> DbResult<()>;

    /// Deletes the student identified by `id`.
    async fn delete_student(&mut self, id: StudentId) -> DbResult<()>;
}
