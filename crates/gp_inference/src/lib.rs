pub mod models;
pub mod prompt;
pub mod repair;

/// Settings for the generative source.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Which source to build: `gemini` (default) or `dummy`.
    pub source: Option<String>,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
}

/// Environment variables consulted, in order, when no key was given explicitly.
pub const API_KEY_VARS: &[&str] = &["API_KEY", "GEMINI_API_KEY"];

impl Config {
    /// Fill a missing API key from the first non-empty variable in [`API_KEY_VARS`].
    pub fn with_api_key_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let given = self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty());
        if !given {
            self.api_key = API_KEY_VARS
                .iter()
                .filter_map(|name| lookup(*name))
                .find(|k| !k.trim().is_empty());
        }
        self
    }

    pub fn with_env_api_key(self) -> Self {
        self.with_api_key_from(|name| std::env::var(name).ok())
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::models::create_source;
    pub use super::repair::repair;
    pub use gp_core::{Article, Error, GeneratedFeed, GenerativeSource, Result};
}

pub use models::create_source;
pub use repair::repair;

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name: &str| vars.iter().find(|(k, _)| *k == name).map(|(_, v)| v.to_string())
    }

    #[test]
    fn test_api_key_falls_back_to_gemini_variable() {
        let config = Config::default().with_api_key_from(env(&[("GEMINI_API_KEY", "g-key")]));
        assert_eq!(config.api_key.as_deref(), Some("g-key"));

        let config = Config::default().with_api_key_from(env(&[("API_KEY", " "), ("GEMINI_API_KEY", "g-key")]));
        assert_eq!(config.api_key.as_deref(), Some("g-key"));

        let config = Config::default().with_api_key_from(env(&[("API_KEY", "a-key"), ("GEMINI_API_KEY", "g-key")]));
        assert_eq!(config.api_key.as_deref(), Some("a-key"));

        assert!(Config::default().with_api_key_from(env(&[])).api_key.is_none());
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let config = Config { api_key: Some("flag".to_string()), ..Config::default() }
            .with_api_key_from(env(&[("GEMINI_API_KEY", "g-key")]));
        assert_eq!(config.api_key.as_deref(), Some("flag"));
    }
}
