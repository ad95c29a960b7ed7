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

//! Business logic for the service.

use crate::db::StudentsTx;
use derivative::Derivative;
use roster_core::db::{Db, DbError};
use roster_core::driver::DriverError;
use std::sync::Arc;

mod student;
mod students;
#[cfg(test)]
pub(crate) mod testutils;

/// Message reported when an operation refers to a student that does not exist.
pub(crate) const STUDENT_NOT_FOUND: &str = "Student not found!";

/// Message reported when a write would leave two students with the same email address.
pub(crate) const EMAIL_IN_USE: &str = "Email address is already in use by another student";

/// Converts a database error into a driver error with messages suitable for the end user.
fn map_db_error(e: DbError) -> DriverError {
    match e {
        DbError::AlreadyExists => DriverError::AlreadyExists(EMAIL_IN_USE.to_owned()),
        DbError::NotFound => DriverError::NotFound(STUDENT_NOT_FOUND.to_owned()),
        e => DriverError::from(e),
    }
}

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub(crate) struct Driver<D>
where
    D: Db + Send + Sync + 'static,
    D::Tx: StudentsTx + Send + 'static,
{
    /// The database that the driver uses for persistence.
    db: Arc<D>,
}

impl<D> Driver<D>
where
    D: Db + Send + Sync + 'static,
    D::Tx: StudentsTx + Send + 'static,
{
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<D>) -> Self {
        Self { db }
    }
}
