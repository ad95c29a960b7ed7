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

//! API to get one student.

use crate::db::StudentsTx;
use crate::driver::Driver;
use crate::model::StudentId;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use roster_core::db::Db;
use roster_core::rest::{EmptyBody, RestError};

/// API handler.
pub(crate) async fn handler<D>(
    State(driver): State<Driver<D>>,
    Path(id): Path<i64>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError>
where
    D: Db + Send + Sync + 'static,
    D::Tx: StudentsTx + Send + 'static,
{
    let student = driver.get_student(StudentId::new(id)).await?;
    Ok(Json(student))
}
