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

//! Building blocks shared by the roster services.
//!
//! A service built on this crate is split in layers, each living in a module of the same name:
//!
//! 1.  `model`: Domain types.  Values are validated when constructed (newtype pattern) so that
//!     the rest of the code can trust them.  Validation of whole untrusted payloads also lives
//!     here and reports its findings as `FieldErrors`.
//!
//! 1.  `db`: Persistence.  A service defines a transaction trait that extends `BareTx` with its
//!     own queries and implements it once per backend.
//!
//! 1.  `driver`: Business logic.  A `Driver` owns the database handle and runs every operation
//!     inside its own transaction.
//!
//! 1.  `rest`: The HTTP interface, one file per API, all funneling failures through `RestError`.
//!
//! 1.  `main`: Reads the configuration from the environment and calls `serve`.
//!
//! Every layer has its own error type (`ModelError`, `DbError`, `DriverError`, `RestError`) and
//! the conversions between them let errors float up with `?` until they become HTTP responses.
//!
//! The database backends are optional: enable the `postgres` feature for production builds and
//! the `sqlite` feature for tests.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
