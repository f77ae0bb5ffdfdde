use std::env;

pub const DEFAULT_MODEL: &str = "codellama:instruct";
pub const DEFAULT_API_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10_000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Generation settings, resolved once at startup: environment variables with
/// defaults, overridable by CLI flags. Values are pass-through; there is no
/// config file layer.
#[derive(Debug, Clone)]
pub struct GenConfig {
    pub model: String,
    pub api_url: String,
    pub max_file_size: u64,
    pub timeout_secs: u64,
}

impl GenConfig {
    pub fn from_env() -> Self {
        Self {
            model: env::var("FLOWSPEC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_url: env::var("FLOWSPEC_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            max_file_size: env_u64("FLOWSPEC_MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE),
            timeout_secs: env_u64("FLOWSPEC_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn env_u64(var: &str, default: u64) -> u64 {
    match env::var(var) {
        Ok(raw) => parse_u64(var, &raw).unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_u64(var: &str, raw: &str) -> Option<u64> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring invalid {var}={raw:?}, expected an integer");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_constants() {
        let cfg = GenConfig::default();
        assert_eq!(cfg.model, "codellama:instruct");
        assert_eq!(cfg.api_url, "http://localhost:11434/api/generate");
        assert_eq!(cfg.max_file_size, 10_000);
        assert_eq!(cfg.timeout_secs, 300);
    }

    #[test]
    fn invalid_integers_fall_back() {
        assert_eq!(parse_u64("FLOWSPEC_MAX_FILE_SIZE", "not-a-number"), None);
        assert_eq!(parse_u64("FLOWSPEC_MAX_FILE_SIZE", " 2048 "), Some(2048));
    }
}
