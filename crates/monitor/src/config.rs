//! Monitor timing configuration.

use std::time::Duration;

/// Normal delay between monitor cycles: 30 minutes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Delay after a failed cycle: 1 minute.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Minimum time between two real alerts for one subscriber: 2 hours.
pub const DEFAULT_ALERT_COOLDOWN: Duration = Duration::from_secs(2 * 60 * 60);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got '{value}'")]
    NotANumber { var: &'static str, value: String },

    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

/// Timing knobs for the threshold monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    pub poll_interval: Duration,
    pub retry_delay: Duration,
    pub cooldown: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            retry_delay: DEFAULT_RETRY_DELAY,
            cooldown: DEFAULT_ALERT_COOLDOWN,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default |
    /// |------------------------------|---------|
    /// | `MONITOR_POLL_INTERVAL_SECS` | `1800`  |
    /// | `MONITOR_RETRY_DELAY_SECS`   | `60`    |
    /// | `ALERT_COOLDOWN_SECS`        | `7200`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            poll_interval: secs(&lookup, "MONITOR_POLL_INTERVAL_SECS", defaults.poll_interval, false)?,
            retry_delay: secs(&lookup, "MONITOR_RETRY_DELAY_SECS", defaults.retry_delay, false)?,
            cooldown: secs(&lookup, "ALERT_COOLDOWN_SECS", defaults.cooldown, true)?,
        })
    }
}

fn secs(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: Duration,
    allow_zero: bool,
) -> Result<Duration, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    let value: u64 = raw.trim().parse().map_err(|_| ConfigError::NotANumber {
        var,
        value: raw.clone(),
    })?;
    if value == 0 && !allow_zero {
        return Err(ConfigError::Zero { var });
    }
    Ok(Duration::from_secs(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = MonitorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, MonitorConfig::default());
        assert_eq!(config.poll_interval, Duration::from_secs(1800));
        assert_eq!(config.retry_delay, Duration::from_secs(60));
        assert_eq!(config.cooldown, Duration::from_secs(7200));
    }

    #[test]
    fn overrides_are_applied() {
        let config = MonitorConfig::from_lookup(lookup(&[
            ("MONITOR_POLL_INTERVAL_SECS", "5"),
            ("ALERT_COOLDOWN_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.cooldown, Duration::ZERO);
    }

    #[test]
    fn rejects_garbage_and_zero_intervals() {
        assert_eq!(
            MonitorConfig::from_lookup(lookup(&[("MONITOR_RETRY_DELAY_SECS", "soon")])),
            Err(ConfigError::NotANumber {
                var: "MONITOR_RETRY_DELAY_SECS",
                value: "soon".to_string()
            })
        );
        assert_eq!(
            MonitorConfig::from_lookup(lookup(&[("MONITOR_POLL_INTERVAL_SECS", "0")])),
            Err(ConfigError::Zero {
                var: "MONITOR_POLL_INTERVAL_SECS"
            })
        );
    }
}
