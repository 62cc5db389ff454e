//! # Informal Bot
//!
//! Discord bot that runs an hourly registration window in each monitored
//! channel.
//!
//! This is the main binary crate that orchestrates the application lifecycle
//! using the Poise framework: it connects to Discord, executes the
//! registration engine's actions over HTTP and drives the per-minute tick.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod logging;
pub mod ticker;
pub mod transport;

pub use bot::*;
pub use error::*;
pub use ticker::RegistrationTicker;
pub use transport::SerenityTransport;
