use log::LevelFilter;

pub const ENV_LOG_LEVEL: &str = "TOURCAL_LOG";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { full_screen: false, log_level: LevelFilter::Warn }
    }
}

impl AppSettings {
    /// Defaults, with the log level taken from `TOURCAL_LOG` when set.
    pub fn load() -> Self {
        let log_level = std::env::var(ENV_LOG_LEVEL)
            .ok()
            .and_then(|raw| parse_level(&raw))
            .unwrap_or(LevelFilter::Warn);
        Self { log_level, ..Self::default() }
    }
}

fn parse_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" INFO "), Some(LevelFilter::Info));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }
}
