//! Tracing subscriber setup.

use crate::error::{BotError, BotResult};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: `level`, falling back to `info`
/// when it does not parse.
#[must_use]
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber, plain text or JSON lines.
pub fn init(level: &str, json: bool) -> BotResult<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(level));
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| BotError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_falls_back() {
        let filter = filter("informal_bot=[[");
        assert!(!filter.to_string().is_empty());
    }
}
