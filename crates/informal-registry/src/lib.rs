//! # Informal Registry
//!
//! The registration core of the bot: per-channel windows, the hourly
//! open/close schedule, the message state machine and the admin surface.
//!
//! Everything that decides *what* happens is synchronous and lives behind
//! [`RegistrationEngine`]. Performing the resulting [`Action`]s against
//! Discord is the job of the [`Dispatcher`] and a [`Transport`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod admin;
pub mod commands;
pub mod deferred;
pub mod dispatch;
pub mod notice;
pub mod processor;
pub mod roster;
pub mod schedule;
pub mod store;
pub mod transport;
pub mod window;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use action::*;
pub use admin::*;
pub use commands::*;
pub use deferred::*;
pub use dispatch::*;
pub use processor::*;
pub use schedule::*;
pub use store::*;
pub use transport::*;
pub use window::*;
