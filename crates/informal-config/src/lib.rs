//! # Informal Config
//!
//! Typed configuration for the informal registration bot.
//!
//! Configuration is read from a YAML file, overridden from environment
//! variables and validated before the bot starts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
