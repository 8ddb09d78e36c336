//! Shared application state

use std::sync::Arc;

use tracing::info;

use crate::chat::{Broadcaster, ChatHistoryStore, JsonFileHistory};
use crate::config::Config;
use crate::error::ChatResult;
use crate::lexicon::{
    DisabledEmojiGenerator, EmojiGenerator, LexiconResolver, MistralEmojiGenerator, RuleTagger,
    Thesaurus,
};
use crate::scrambler::Scrambler;

/// State handed to every route
pub struct AppState {
    pub broadcaster: Arc<Broadcaster>,
}

impl AppState {
    pub fn new(broadcaster: Arc<Broadcaster>) -> Self {
        Self { broadcaster }
    }

    /// Wire up history, lexical adapters and scrambler from configuration
    pub fn from_config(config: &Config) -> ChatResult<Self> {
        let history = JsonFileHistory::open(&config.history_file)?;
        info!(path = %history.path().display(), "chat history opened");
        let history: Arc<dyn ChatHistoryStore> = Arc::new(history);

        let thesaurus = match &config.lexicon_file {
            Some(path) => Thesaurus::from_file(path)?,
            None => Thesaurus::builtin(),
        };
        info!(
            groups = thesaurus.group_count(),
            workers = config.lexicon_workers,
            "lexicon loaded"
        );
        let synonyms = Arc::new(LexiconResolver::new(thesaurus, config.lexicon_workers)?);

        let emoji: Arc<dyn EmojiGenerator> = match config.mistral() {
            Some(mistral) => {
                info!(model = %mistral.model, "emoji generation enabled");
                // Requests never outlive the pipeline's leaf timeout
                let client = reqwest::Client::builder()
                    .timeout(config.scrambler_settings().leaf_timeout)
                    .build()?;
                Arc::new(MistralEmojiGenerator::with_client(mistral, client))
            }
            None => {
                info!("no Mistral API key, emoji mode will pass messages through");
                Arc::new(DisabledEmojiGenerator)
            }
        };

        let scrambler = Arc::new(Scrambler::new(
            Arc::new(RuleTagger::new()),
            synonyms,
            emoji,
            config.scrambler_settings(),
        ));

        Ok(Self::new(Arc::new(Broadcaster::new(scrambler, history))))
    }

    pub fn participant_count(&self) -> usize {
        self.broadcaster.registry().len()
    }
}
