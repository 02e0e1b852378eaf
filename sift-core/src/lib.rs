// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by the sift operator crates.
//!
//! This crate defines the item and error model used throughout the workspace:
//!
//! - [`StreamItem`]: a stream element that is either a value or a terminal
//!   error, following Rx-style error semantics.
//! - [`SiftError`]: the root error type for predicate and stream failures.
//! - [`Result`]: shorthand alias for `Result<T, SiftError>`.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod error;
pub mod stream_item;

pub use self::error::{IntoSiftError, Result, SiftError};
pub use self::stream_item::StreamItem;
