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

//! Operations on the collection of students.

use crate::db::StudentsTx;
use crate::driver::{Driver, map_db_error};
use crate::model::*;
use log::info;
use roster_core::db::{BareTx, Db};
use roster_core::driver::DriverResult;

impl<D> Driver<D>
where
    D: Db + Send + Sync + 'static,
    D::Tx: StudentsTx + Send + 'static,
{
    /// Gets all students ordered by identifier.
    pub(crate) async fn get_students(self) -> DriverResult<Vec<Student>> {
        let mut tx = self.db.begin().await?;
        let students = tx.get_students().await.map_err(map_db_error)?;
        tx.commit().await?;
        Ok(students)
    }

    /// Creates a new student with the given `fields`.
    pub(crate) async fn create_student(self, fields: StudentFields) -> DriverResult<Student> {
        let mut tx = self.db.begin().await?;
        let student = tx.create_student(&fields).await.map_err(map_db_error)?;
        tx.commit().await?;
        info!("Created student {}", student.id().as_i64());
        Ok(student)
    }
}
