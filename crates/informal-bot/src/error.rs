//! Application-wide error types using thiserror.

use informal_config::ConfigError;
use informal_registry::ScheduleError;
use poise::serenity_prelude as serenity;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid registration window.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// The per-minute tick could not be started or stopped.
    #[error("Scheduler error: {0}")]
    Scheduler(String),

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<anyhow::Error> for BotError {
    fn from(err: anyhow::Error) -> Self {
        Self::Scheduler(format!("{err:#}"))
    }
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn start_client() -> Result<(), serenity::Error> {
        Err(serenity::Error::Other("gateway refused the token"))
    }

    fn run() -> BotResult<()> {
        start_client()?;
        Ok(())
    }

    #[test]
    fn test_client_errors_become_discord_errors() {
        let err = run().unwrap_err();
        assert!(matches!(err, BotError::Discord(_)));
        assert!(err.to_string().starts_with("Discord error: "));
    }

    #[test]
    fn test_scheduler_errors_keep_context() {
        let err = BotError::from(anyhow::anyhow!("tick failed").context("Failed to start ticker"));
        assert!(matches!(err, BotError::Scheduler(_)));
        assert_eq!(err.to_string(), "Scheduler error: Failed to start ticker: tick failed");
    }
}
