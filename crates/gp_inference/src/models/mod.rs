use gp_core::{Error, GenerativeSource, Result};
use std::sync::Arc;

pub use crate::Config;

pub mod dummy;
pub mod gemini;

pub use dummy::DummySource;
pub use gemini::GeminiSource;

/// Names accepted by [`create_source`].
pub const AVAILABLE_SOURCES: &[&str] = &["gemini", "dummy"];

/// Build the generative source named by `config.source`, defaulting to Gemini.
pub async fn create_source(config: Option<Config>) -> Result<Arc<dyn GenerativeSource>> {
    let config = config.unwrap_or_default();
    let kind = config.source.clone().unwrap_or_else(|| "gemini".to_string());

    match kind.to_lowercase().as_str() {
        "gemini" => Ok(Arc::new(GeminiSource::new(&config))),
        "dummy" => Ok(Arc::new(DummySource::new(Some(config)).await?)),
        other => Err(Error::InvalidValue(format!(
            "Unknown generative source '{}'. Available sources: {}",
            other,
            AVAILABLE_SOURCES.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_source() {
        let source = create_source(None).await.unwrap();
        assert_eq!(source.name(), "Gemini");

        let config = Config { source: Some("dummy".to_string()), ..Config::default() };
        let source = create_source(Some(config)).await.unwrap();
        assert_eq!(source.name(), "Dummy");

        let config = Config { source: Some("deepseek".to_string()), ..Config::default() };
        assert!(create_source(Some(config)).await.is_err());
    }
}
