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

//! Validation of untrusted student payloads.
//!
//! Payloads are checked field by field and every problem found is reported at once, so that a
//! client can fix all of them in a single round trip.

use crate::model::{DATE_FORMAT, StudentFields, StudentName};
use roster_core::model::{EmailAddress, FieldErrors, SCHEMA_FIELD};
use serde_json::{Map, Value};
use time::Date;

/// Message for a required field that is absent or null.
const MISSING_FIELD: &str = "Missing data for required field.";

/// Message for a field that should hold a string but holds something else.
const NOT_A_STRING: &str = "Not a valid string.";

/// Message for a date field that cannot be parsed.
const NOT_A_DATE: &str = "Not a valid date.";

/// Message for a field that clients are not allowed to supply.
const UNKNOWN_FIELD: &str = "Unknown field.";

/// Message for a payload that is not a JSON object.
const INVALID_INPUT_TYPE: &str = "Invalid input type.";

/// Fields accepted in student payloads.  `id` is output-only.
const KNOWN_FIELDS: &[&str] = &["first_name", "last_name", "email", "start_date"];

/// Extracts the required string `field` from `object`, recording any problem in `errors`.
fn required_str<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    match object.get(field) {
        None | Some(Value::Null) => {
            errors.add(field, MISSING_FIELD);
            None
        }
        Some(Value::String(s)) => Some(s),
        Some(_) => {
            errors.add(field, NOT_A_STRING);
            None
        }
    }
}

/// Extracts the name in `field` from `object`, recording any problem in `errors`.
fn name(object: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<StudentName> {
    let raw = required_str(object, field, errors)?;
    match StudentName::new(raw) {
        Ok(name) => Some(name),
        Err(e) => {
            errors.add(field, e.to_string());
            None
        }
    }
}

/// Extracts the email address from `object`, recording any problem in `errors`.
fn email(object: &Map<String, Value>, errors: &mut FieldErrors) -> Option<EmailAddress> {
    let raw = required_str(object, "email", errors)?;
    match EmailAddress::new(raw) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.add("email", e.to_string());
            None
        }
    }
}

/// Extracts the optional start date from `object`, recording any problem in `errors`.
fn start_date(object: &Map<String, Value>, errors: &mut FieldErrors) -> Option<Date> {
    match object.get("start_date") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => match Date::parse(s, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.add("start_date", NOT_A_DATE);
                None
            }
        },
        Some(_) => {
            errors.add("start_date", NOT_A_DATE);
            None
        }
    }
}

/// Validates the `raw` payload of a create or update request.
///
/// On success, returns the validated fields.  On failure, returns every problem found keyed by
/// the name of the offending field.  This does not check for email uniqueness, which is up to
/// the database.
pub(crate) fn validate_student(raw: &Value) -> Result<StudentFields, FieldErrors> {
    let mut errors = FieldErrors::default();

    let object = match raw.as_object() {
        Some(object) => object,
        None => {
            errors.add(SCHEMA_FIELD, INVALID_INPUT_TYPE);
            return Err(errors);
        }
    };

    let first_name = name(object, "first_name", &mut errors);
    let last_name = name(object, "last_name", &mut errors);
    let email = email(object, &mut errors);
    let start_date = start_date(object, &mut errors);

    for key in object.keys() {
        if !KNOWN_FIELDS.contains(&key.as_str()) {
            errors.add(key.as_str(), UNKNOWN_FIELD);
        }
    }

    match (first_name, last_name, email) {
        (Some(first_name), Some(last_name), Some(email)) if errors.is_empty() => {
            Ok(StudentFields::new(first_name, last_name, email, start_date))
        }
        _ => Err(errors),
    }
}
