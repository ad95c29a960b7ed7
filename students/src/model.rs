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

//! High-level data types.

use derive_getters::Getters;
use derive_more::Constructor;
use roster_core::model::{EmailAddress, ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

pub(crate) mod schema;

/// Maximum length of first and last names, in characters.
pub(crate) const MAX_NAME_LENGTH: usize = 50;

/// Textual representation of dates in payloads: `YYYY-MM-DD`.
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Newtype pattern for the identifiers assigned by the database to new students.
#[derive(Clone, Constructor, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub(crate) struct StudentId(i64);

impl StudentId {
    /// Returns the identifier as the raw integer stored in the database.
    pub(crate) fn as_i64(&self) -> i64 {
        self.0
    }
}

/// A first or last name: not empty and at most `MAX_NAME_LENGTH` characters long.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "String")]
pub(crate) struct StudentName(String);

impl StudentName {
    /// Creates a new name from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        if s.is_empty() {
            return Err(ModelError("Name cannot be empty".to_owned()));
        }
        if s.chars().count() > MAX_NAME_LENGTH {
            return Err(ModelError(format!(
                "Name is too long (at most {} characters)",
                MAX_NAME_LENGTH
            )));
        }

        Ok(Self(s))
    }

    /// Returns a string view of the name.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StudentName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StudentName::new(value)
    }
}

/// The mutable properties of a student, as supplied by clients on creation and update.
///
/// Every field is replaced as a whole on update, so an absent `start_date` in an update clears
/// any previously-stored date.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct StudentFields {
    /// The student's first name.
    first_name: StudentName,

    /// The student's last name.
    last_name: StudentName,

    /// The student's email address.  Unique across all students.
    email: EmailAddress,

    /// The date in which the student started, if known.
    start_date: Option<Date>,
}

/// A student as stored in the database.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct Student {
    /// Identifier assigned by the database when the student was created.
    id: StudentId,

    /// The student's first name.
    first_name: StudentName,

    /// The student's last name.
    last_name: StudentName,

    /// The student's email address.
    email: EmailAddress,

    /// The date in which the student started, if known.
    #[serde(with = "iso_date::option", default)]
    start_date: Option<Date>,
}

impl Student {
    /// Creates a student from its database `id` and its `fields`.
    pub(crate) fn new(id: StudentId, fields: StudentFields) -> Self {
        let StudentFields { first_name, last_name, email, start_date } = fields;
        Self { id, first_name, last_name, email, start_date }
    }

    /// Returns a copy of the mutable properties of this student.
    #[cfg(test)]
    pub(crate) fn fields(&self) -> StudentFields {
        StudentFields::new(
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.start_date,
        )
    }
}
