//! Auto-save timing configuration.

use std::time::Duration;

/// Default quiet period before a change is saved.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;
/// Default number of retries after the first failed attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default delay before the first retry; doubles on each further retry.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
/// Default time the `saved` status is shown before returning to `idle`.
pub const DEFAULT_SAVED_DISPLAY_MS: u64 = 3000;

/// Timing and retry policy for an auto-save controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoSaveConfig {
    /// Quiet period after the last change before saving.
    pub debounce_ms: u64,
    /// Retries after the first failed attempt.
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds.
    pub retry_delay_ms: u64,
    /// How long `saved` is shown before falling back to `idle`.
    pub saved_display_ms: u64,
    /// Whether saving is enabled at start.
    pub enabled: bool,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            saved_display_ms: DEFAULT_SAVED_DISPLAY_MS,
            enabled: true,
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl AutoSaveConfig {
    /// Read the configuration from `BUILDER_AUTOSAVE_*` environment
    /// variables, falling back to the defaults for missing or invalid ones.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `BUILDER_AUTOSAVE_DEBOUNCE_MS` | `debounce_ms` |
    /// | `BUILDER_AUTOSAVE_MAX_RETRIES` | `max_retries` |
    /// | `BUILDER_AUTOSAVE_RETRY_DELAY_MS` | `retry_delay_ms` |
    /// | `BUILDER_AUTOSAVE_SAVED_DISPLAY_MS` | `saved_display_ms` |
    /// | `BUILDER_AUTOSAVE_ENABLED` | `enabled` |
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            debounce_ms: env_parse("BUILDER_AUTOSAVE_DEBOUNCE_MS", defaults.debounce_ms),
            max_retries: env_parse("BUILDER_AUTOSAVE_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_parse("BUILDER_AUTOSAVE_RETRY_DELAY_MS", defaults.retry_delay_ms),
            saved_display_ms: env_parse(
                "BUILDER_AUTOSAVE_SAVED_DISPLAY_MS",
                defaults.saved_display_ms,
            ),
            enabled: env_parse("BUILDER_AUTOSAVE_ENABLED", defaults.enabled),
        }
    }

    /// Set the debounce period.
    #[must_use]
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Set the number of retries.
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the initial retry delay.
    #[must_use]
    pub fn with_retry_delay_ms(mut self, ms: u64) -> Self {
        self.retry_delay_ms = ms;
        self
    }

    /// Set how long `saved` is displayed.
    #[must_use]
    pub fn with_saved_display_ms(mut self, ms: u64) -> Self {
        self.saved_display_ms = ms;
        self
    }

    /// Start enabled or disabled.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Delay before retrying after failed attempt `attempt` (1-indexed):
    /// `retry_delay_ms * 2^(attempt - 1)`.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        Duration::from_millis(self.retry_delay_ms.saturating_mul(factor))
    }

    pub(crate) fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub(crate) fn saved_display(&self) -> Duration {
        Duration::from_millis(self.saved_display_ms)
    }
}
