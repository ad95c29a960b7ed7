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

//! API to delete one student.

use crate::db::StudentsTx;
use crate::driver::Driver;
use crate::model::StudentId;
use crate::rest::MessageResponse;
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
    let student = driver.delete_student(StudentId::new(id)).await?;
    Ok(Json(MessageResponse::new(format!(
        "{} has been deleted!",
        student.first_name().as_str()
    ))))
}

#[cfg(test)]
mod tests {
    use crate::rest::MessageResponse;
    use crate::rest::testutils::*;
    use axum::http;
    use roster_core::rest::testutils::*;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::DELETE, format!("/students/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let ana = context.create_student("Ana", "Lee", "ana@example.com", None).await;
        let bob = context.create_student("Bob", "Ray", "bob@example.com", None).await;

        let response = OneShotBuilder::new(context.app(), route(&ana.id().as_i64().to_string()))
            .send_empty()
            .await
            .expect_json::<MessageResponse>()
            .await;
        assert_eq!("Ana has been deleted!", response.message);

        assert_eq!(None, context.get_student(*ana.id()).await);
        assert_eq!(vec![bob], context.get_students().await);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        let ana = context.create_student("Ana", "Lee", "ana@example.com", None).await;

        OneShotBuilder::new(context.app(), route("99999999"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Student not found!$")
            .await;

        assert_eq!(vec![ana], context.get_students().await);
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route("1"));
}
