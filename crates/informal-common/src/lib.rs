//! # Informal Common
//!
//! Shared types, the fixed-offset clock and small formatting utilities used
//! by every crate in the informal registration bot workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use clock::*;
pub use types::*;
pub use utils::*;
