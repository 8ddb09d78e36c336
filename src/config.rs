//! Server configuration from CLI flags and environment

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::{ChatError, ChatResult};
use crate::lexicon::MistralConfig;
use crate::scrambler::ScramblerSettings;

/// Scrappy chat relay
#[derive(Parser, Clone, Debug)]
#[command(name = "scrappy-server", version, about = "Telephone-game chat relay")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "SCRAPPY_PORT", default_value = "8000")]
    pub port: u16,

    /// Bind address
    #[arg(long, env = "SCRAPPY_BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    /// JSON file holding the chat log
    #[arg(long, env = "SCRAPPY_HISTORY_FILE", default_value = "chat_log.json")]
    pub history_file: PathBuf,

    /// Directory of static web assets served at `/`
    #[arg(long, env = "SCRAPPY_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// JSON thesaurus replacing the built-in synonym groups
    #[arg(long, env = "SCRAPPY_LEXICON_FILE")]
    pub lexicon_file: Option<PathBuf>,

    /// Threads in the synonym lookup pool
    #[arg(long, env = "SCRAPPY_LEXICON_WORKERS", default_value = "4")]
    pub lexicon_workers: usize,

    /// Mistral API key; emoji mode passes messages through without one
    #[arg(long, env = "MISTRAL_API_KEY", hide_env_values = true)]
    pub mistral_api_key: Option<String>,

    /// Mistral model used for emoji rendering
    #[arg(long, env = "MISTRAL_MODEL", default_value = crate::lexicon::DEFAULT_MODEL)]
    pub mistral_model: String,

    /// Mistral API base URL
    #[arg(long, env = "MISTRAL_BASE_URL", default_value = crate::lexicon::DEFAULT_BASE_URL)]
    pub mistral_base_url: String,

    /// Timeout for each tagger, synonym and emoji call, in milliseconds
    #[arg(long, env = "SCRAPPY_LEAF_TIMEOUT_MS", default_value = "5000")]
    pub leaf_timeout_ms: u64,

    /// Probability that a message takes the word-scrambling route
    #[arg(long, env = "SCRAPPY_LINGUISTIC_PROBABILITY", default_value = "0.7")]
    pub linguistic_probability: f64,

    /// Enable structured JSON logging
    #[arg(long, env = "SCRAPPY_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Reject values the server cannot run with
    pub fn validate(&self) -> ChatResult<()> {
        if !(0.0..=1.0).contains(&self.linguistic_probability) {
            return Err(ChatError::Config(format!(
                "linguistic probability must be within [0, 1], got {}",
                self.linguistic_probability
            )));
        }
        if self.leaf_timeout_ms == 0 {
            return Err(ChatError::Config("leaf timeout must be positive".to_string()));
        }
        if self.lexicon_workers == 0 {
            return Err(ChatError::Config("lexicon workers must be positive".to_string()));
        }
        Ok(())
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn scrambler_settings(&self) -> ScramblerSettings {
        ScramblerSettings {
            linguistic_probability: self.linguistic_probability,
            leaf_timeout: Duration::from_millis(self.leaf_timeout_ms),
        }
    }

    /// Mistral settings, if an API key is configured
    pub fn mistral(&self) -> Option<MistralConfig> {
        let api_key = self.mistral_api_key.as_deref()?.trim();
        if api_key.is_empty() {
            return None;
        }
        Some(MistralConfig {
            api_key: api_key.to_string(),
            model: self.mistral_model.clone(),
            base_url: self.mistral_base_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["scrappy-server"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&[
            "--port",
            "9001",
            "--linguistic-probability",
            "0.25",
            "--leaf-timeout-ms",
            "750",
        ]);
        assert_eq!(config.listen_address(), format!("{}:9001", config.bind_address));

        let settings = config.scrambler_settings();
        assert_eq!(settings.linguistic_probability, 0.25);
        assert_eq!(settings.leaf_timeout, Duration::from_millis(750));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_probability() {
        let config = parse(&["--linguistic-probability", "1.5"]);
        assert!(matches!(config.validate(), Err(ChatError::Config(_))));
    }

    #[test]
    fn test_blank_api_key_disables_mistral() {
        let config = parse(&["--mistral-api-key", "  "]);
        assert!(config.mistral().is_none());

        let config = parse(&["--mistral-api-key", "secret"]);
        assert_eq!(config.mistral().unwrap().api_key, "secret");
    }
}
