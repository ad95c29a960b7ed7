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

//! Entry point to the REST server.

use crate::db::StudentsTx;
use crate::driver::Driver;
use axum::Router;
use roster_core::db::Db;
use serde::{Deserialize, Serialize};

mod student_delete;
mod student_get;
mod student_post;
mod student_put;
mod students_get;
#[cfg(test)]
mod testutils;

/// Body of the responses to write operations.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct MessageResponse {
    /// Human-readable description of the outcome.
    pub(crate) message: String,
}

impl MessageResponse {
    /// Creates a new response carrying `message`.
    pub(crate) fn new<S: Into<String>>(message: S) -> Self {
        Self { message: message.into() }
    }
}

/// Creates the router for the application.
pub(crate) fn app<D>(driver: Driver<D>) -> Router
where
    D: Db + Send + Sync + 'static,
    D::Tx: StudentsTx + Send + 'static,
{
    use axum::routing::{get, post};
    Router::new()
        .route("/get_students", get(students_get::handler))
        .route("/add_student", post(student_post::handler))
        .route(
            "/students/:id",
            get(student_get::handler).put(student_put::handler).delete(student_delete::handler),
        )
        .with_state(driver)
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use crate::model::*;
    use axum::http;
    use roster_core::model::FieldErrors;
    use roster_core::rest::testutils::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_crud_lifecycle() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), (http::Method::POST, "/add_student"))
            .send_json(json!({
                "first_name": "Ana",
                "last_name": "Lee",
                "email": "ana@example.com",
            }))
            .await
            .expect_json::<super::MessageResponse>()
            .await;
        assert_eq!("New Student: Ana was added to the database!", response.message);

        let students = OneShotBuilder::new(context.app(), (http::Method::GET, "/get_students"))
            .send_empty()
            .await
            .expect_json::<Vec<Student>>()
            .await;
        assert_eq!(1, students.len());
        let id = students[0].id().as_i64();
        assert_eq!("Ana", students[0].first_name().as_str());
        assert_eq!(&None, students[0].start_date());

        let errors =
            OneShotBuilder::new(context.app(), (http::Method::PUT, format!("/students/{}", id)))
                .send_json(json!({"first_name": "Ana", "email": "ana@example.com"}))
                .await
                .expect_status(http::StatusCode::BAD_REQUEST)
                .expect_field_errors()
                .await;
        let mut exp_errors = FieldErrors::default();
        exp_errors.add("last_name", "Missing data for required field.");
        assert_eq!(exp_errors, errors);

        let response =
            OneShotBuilder::new(context.app(), (http::Method::PUT, format!("/students/{}", id)))
                .send_json(json!({
                    "first_name": "Anna",
                    "last_name": "Lee",
                    "email": "anna@example.com",
                    "start_date": "2024-09-02",
                }))
                .await
                .expect_json::<super::MessageResponse>()
                .await;
        assert_eq!("Anna has been updated!", response.message);

        let student =
            OneShotBuilder::new(context.app(), (http::Method::GET, format!("/students/{}", id)))
                .send_empty()
                .await
                .expect_json::<Student>()
                .await;
        assert_eq!("anna@example.com", student.email().as_str());
        assert_eq!("2024-09-02", serde_json::to_value(&student).unwrap()["start_date"]);

        let response =
            OneShotBuilder::new(context.app(), (http::Method::DELETE, format!("/students/{}", id)))
                .send_empty()
                .await
                .expect_json::<super::MessageResponse>()
                .await;
        assert_eq!("Anna has been deleted!", response.message);

        OneShotBuilder::new(context.app(), (http::Method::GET, format!("/students/{}", id)))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Student not found!$")
            .await;
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), (http::Method::GET, "/students"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_text("^$")
            .await;
    }
}
