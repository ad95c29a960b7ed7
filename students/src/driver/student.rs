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

//! Operations on one student.

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
    /// Gets the student identified by `id`.
    pub(crate) async fn get_student(self, id: StudentId) -> DriverResult<Student> {
        let mut tx = self.db.begin().await?;
        let student = tx.get_student(id).await.map_err(map_db_error)?;
        tx.commit().await?;
        Ok(student)
    }

    /// Replaces the fields of the existing student identified by `id` with `fields`.
    ///
    /// Returns the student as it was stored after the update.
    pub(crate) async fn update_student(
        self,
        id: StudentId,
        fields: StudentFields,
    ) -> DriverResult<Student> {
        let mut tx = self.db.begin().await?;
        tx.get_student(id).await.map_err(map_db_error)?;
        tx.update_student(id, &fields).await.map_err(map_db_error)?;
        tx.commit().await?;
        info!("Updated student {}", id.as_i64());
        Ok(Student::new(id, fields))
    }

    /// Deletes the student identified by `id`.
    ///
    /// Returns the student as it was stored right before the deletion.
    pub(crate) async fn delete_student(self, id: StudentId) -> DriverResult<Student> {
        let mut tx = self.db.begin().await?;
        let student = tx.get_student(id).await.map_err(map_db_error)?;
        tx.delete_student(id).await.map_err(map_db_error)?;
        tx.commit().await?;
        info!("Deleted student {}", id.as_i64());
        Ok(student)
    }
}
