use std::time::Duration;

/// Server tunables, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// How long a disconnected player keeps their seat before removal.
    pub grace_period: Duration,
    /// Presentation pause between a winner being picked and the next round.
    pub winner_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            grace_period: Duration::from_secs(15),
            winner_delay: Duration::from_millis(6500),
        }
    }
}

impl ServerConfig {
    /// Load config from environment variables, falling back to defaults.
    /// PORT, GRACE_PERIOD_SECS, WINNER_DELAY_MS.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let grace_period = std::env::var("GRACE_PERIOD_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.grace_period);

        let winner_delay = std::env::var("WINNER_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.winner_delay);

        Self {
            port,
            grace_period,
            winner_delay,
        }
    }
}
