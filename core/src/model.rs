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

//! Generic data types shared by all services.
//!
//! Types in this module validate their contents at construction time.  Services should follow
//! the same pattern in their own `model` modules so that any value that makes it past the REST
//! layer is known to be well-formed.

mod emailaddress;
pub use emailaddress::EmailAddress;
mod field_errors;
pub use field_errors::{FieldErrors, SCHEMA_FIELD};

/// Error raised when a value does not satisfy the invariants of its type.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;
