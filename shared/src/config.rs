use tracing::warn;

/// Cache sizing and maintenance settings, loaded from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub max_entries: usize,
    pub sweep_interval_secs: u64,
}

impl Config {
    const DEFAULT_MAX_ENTRIES: usize = 1000;
    const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

    pub fn from_env() -> Self {
        let max_entries = std::env::var("MATRIX_CACHE_MAX_ENTRIES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(Self::DEFAULT_MAX_ENTRIES);
        if max_entries == 0 {
            warn!("MATRIX_CACHE_MAX_ENTRIES is 0, falling back to default capacity");
        }
        Self {
            max_entries: if max_entries == 0 {
                Self::DEFAULT_MAX_ENTRIES
            } else {
                max_entries
            },
            sweep_interval_secs: std::env::var("MATRIX_CACHE_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(Self::DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: Self::DEFAULT_MAX_ENTRIES,
            sweep_interval_secs: Self::DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = Config::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.sweep_interval_secs, 60);
    }

    #[test]
    fn env_overrides_are_parsed() {
        unsafe {
            std::env::set_var("MATRIX_CACHE_MAX_ENTRIES", "250");
            std::env::set_var("MATRIX_CACHE_SWEEP_INTERVAL_SECS", "5");
        }

        let config = Config::from_env();

        unsafe {
            std::env::remove_var("MATRIX_CACHE_MAX_ENTRIES");
            std::env::remove_var("MATRIX_CACHE_SWEEP_INTERVAL_SECS");
        }

        assert_eq!(config.max_entries, 250);
        assert_eq!(config.sweep_interval_secs, 5);
    }
}
