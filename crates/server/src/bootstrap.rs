use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use frontdesk_agent::DialogueEngine;
use frontdesk_channels::{
    AudioSocketAdapter, SmsAdapter, UnavailableTranscriber, VoiceAdapter,
};
use frontdesk_core::config::{AppConfig, ConfigError, LoadOptions};
use frontdesk_store::{FileKnowledgeRepository, KnowledgeStore, SessionStore};

pub struct Application {
    pub config: AppConfig,
    pub sessions: Arc<SessionStore>,
    pub knowledge: Arc<KnowledgeStore>,
    pub engine: Arc<DialogueEngine>,
    pub sms: Arc<SmsAdapter>,
    pub voice: Arc<VoiceAdapter>,
    pub audio: Arc<AudioSocketAdapter>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        business_type = %config.business.business_type,
        "starting application bootstrap"
    );

    let business_type = config.business.business_type;
    let repository = Arc::new(FileKnowledgeRepository::new(&config.knowledge.data_path));
    let knowledge = Arc::new(KnowledgeStore::open(business_type, repository).await);
    info!(
        event_name = "system.bootstrap.knowledge_ready",
        data_path = %config.knowledge.data_path.display(),
        "knowledge store initialized"
    );

    let sessions = Arc::new(SessionStore::new());
    let engine = Arc::new(DialogueEngine::new(Arc::clone(&sessions), Arc::clone(&knowledge)));

    let sms = Arc::new(SmsAdapter::new(Arc::clone(&engine), business_type));
    let voice = Arc::new(VoiceAdapter::new(Arc::clone(&engine), business_type));
    let audio = Arc::new(AudioSocketAdapter::new(
        Arc::clone(&engine),
        Arc::new(UnavailableTranscriber),
        business_type,
    ));

    info!(event_name = "system.bootstrap.ready", "application bootstrap complete");

    Ok(Application { config, sessions, knowledge, engine, sms, voice, audio })
}

#[cfg(test)]
mod tests {
    use frontdesk_core::config::{ConfigOverrides, LoadOptions};

    use crate::bootstrap::bootstrap;

    #[tokio::test]
    async fn bootstrap_fails_fast_on_invalid_config() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                log_level: Some("verbose".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await;

        let message = result.err().expect("error").to_string();
        assert!(message.contains("logging.level"));
    }

    #[tokio::test]
    async fn bootstrap_serves_defaults_when_no_knowledge_file_exists() {
        let dir = tempfile_dir();
        let app = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                knowledge_data_path: Some(dir.join("absent.json")),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await
        .expect("bootstrap");

        let reply = app
            .engine
            .handle_turn("smoke", app.config.business.business_type, "What are your hours?")
            .await
            .expect("turn");
        assert_eq!(reply, "We are open Monday-Sunday: 11am-10pm.");
        assert_eq!(app.sessions.len().await, 1);
    }

    fn tempfile_dir() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("frontdesk-bootstrap-{}", uuid::Uuid::new_v4()))
    }
}
