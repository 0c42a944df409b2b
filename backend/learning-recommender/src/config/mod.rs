use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Recommendation
    pub mastery_threshold: f64,
    pub collaborative_top_k: usize,
    pub collaborative_neighbors: usize,
    pub dashboard_top_k: usize,
    pub hybrid_limit: usize,

    // Tutor fallback backend (Ollama-compatible)
    pub tutor_fallback_enabled: bool,
    pub answer_service_url: String,
    pub answer_service_model: String,
    pub answer_service_timeout_seconds: u64,

    // Observability
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mastery_threshold: 0.7,
            collaborative_top_k: 5,
            collaborative_neighbors: 5,
            dashboard_top_k: 3,
            hybrid_limit: 5,
            tutor_fallback_enabled: true,
            answer_service_url: "http://localhost:11434".to_string(),
            answer_service_model: "deepseek-r1:14b".to_string(),
            answer_service_timeout_seconds: 60,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("mastery_threshold", 0.7)?
            .set_default("collaborative_top_k", 5)?
            .set_default("collaborative_neighbors", 5)?
            .set_default("dashboard_top_k", 3)?
            .set_default("hybrid_limit", 5)?
            .set_default("tutor_fallback_enabled", true)?
            .set_default("answer_service_url", "http://localhost:11434")?
            .set_default("answer_service_model", "deepseek-r1:14b")?
            .set_default("answer_service_timeout_seconds", 60)?
            .set_default("log_level", "info")?
            .set_default("log_format", "text")?
            .add_source(config::Environment::default().separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.mastery_threshold > 0.0 && self.mastery_threshold <= 1.0) {
            return Err(anyhow!(
                "Mastery threshold must be in (0, 1], got {}",
                self.mastery_threshold
            ));
        }

        if self.collaborative_top_k == 0 {
            return Err(anyhow!("Collaborative top_k must be greater than 0"));
        }

        if self.collaborative_neighbors == 0 {
            return Err(anyhow!("Collaborative neighbor count must be greater than 0"));
        }

        if self.hybrid_limit == 0 {
            return Err(anyhow!("Hybrid limit must be greater than 0"));
        }

        if self.tutor_fallback_enabled && self.answer_service_url.is_empty() {
            return Err(anyhow!("Answer service URL is required when tutor fallback is enabled"));
        }

        if !matches!(self.log_format.as_str(), "text" | "json") {
            return Err(anyhow!("Log format must be 'text' or 'json'"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!((config.mastery_threshold - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.hybrid_limit, 5);
        assert_eq!(config.dashboard_top_k, 3);
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let config = Config {
            mastery_threshold: 1.5,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            mastery_threshold: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = Config {
            hybrid_limit: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            collaborative_top_k: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let config = Config {
            log_format: "xml".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
