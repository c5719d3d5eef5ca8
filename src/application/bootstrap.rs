//! Startup sequence: config, dispatcher, connection, message loop

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use crate::application::catalog;
use crate::application::errors::BotError;
use crate::application::messaging::CommandDispatcher;
use crate::application::services::MessageService;
use crate::domain::traits::Bot;
use crate::infrastructure::config::Config;

/// Load and validate the config, applying a command-line token override.
pub fn load_config(config_path: &Path, token_override: Option<String>) -> Result<Config, BotError> {
    let config = Config::load(config_path)?.with_token(token_override);
    config.validate()?;
    Ok(config)
}

/// Build the dispatcher for a loaded config
pub fn build_dispatcher(config: &Config) -> CommandDispatcher {
    let registry = catalog::default_registry(&config.prefix, config.today_path())
        .case_insensitive(config.case_insensitive);
    CommandDispatcher::new(config.prefix.clone(), registry)
}

/// Run the bot until the connection closes.
///
/// `connect` is only called once the config has loaded and validated, so a
/// bad config never opens a connection.
pub async fn run<F, Fut, B>(config_path: &Path, token_override: Option<String>, connect: F) -> Result<(), BotError>
where
    F: FnOnce(Config) -> Fut,
    Fut: Future<Output = Result<B, BotError>>,
    B: Bot,
{
    let config = load_config(config_path, token_override)?;
    tracing::info!("Loaded config from {}", config_path.display());

    let dispatcher = Arc::new(build_dispatcher(&config));
    let bot = connect(config).await?;

    let mut service = MessageService::new(bot, dispatcher);
    service.run().await
}
