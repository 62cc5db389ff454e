//! # Informal Commands
//!
//! Discord command implementations using the Poise framework for the
//! informal registration bot.
//!
//! This crate provides the `/registration`, `/ping` and `/help` slash
//! commands and the message event handler that feeds channel messages into
//! the registration engine.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod convert;
pub mod events;
pub mod framework;
pub mod help;
pub mod ping;
pub mod registration;

pub use framework::*;
pub use registration::RegistrationAction;
