//! # flashdeck-core - Core Domain Types
//!
//! Foundation crate for flashdeck. Provides domain types, drive eligibility
//! rules, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Drive`] - A storage device that can be chosen as a flash target
//! - [`SourceImage`] - The image selected for flashing
//!
//! ### Constraints (`constraints`)
//! - [`DriveConstraints`] - Eligibility predicates for candidate drives
//! - [`StandardConstraints`] - Default rule set (locked, too small, system, source)
//! - [`DriveStatus`] - Why a drive is flagged
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use flashdeck_core::prelude::*;
//! ```

pub mod constraints;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod types;

pub use constraints::{DriveConstraints, DriveStatus, Severity, StandardConstraints};
pub use error::{Error, Result, ResultExt};
pub use types::{format_size, Drive, Mountpoint, SourceImage};
