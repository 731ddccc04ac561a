use anyhow::{Context, Result};
use clap::Parser;
use ifcloc_app::cli::Cli;
use ifcloc_app::driver;
use ifcloc_app::logging;
use ifcloc_app::pipeline::Pipeline;
use ifcloc_config::Config;
use ifcloc_crowdin::CrowdinClient;
use ifcloc_translator::{OpenAiChat, TokenSafeTranslator};

#[tokio::main]
async fn main() -> Result<()> {
    // Load credentials from .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.log_format);

    let config = Config::from_env().context("Invalid configuration")?;
    config.crowdin.require_project_id()?;

    let target_lang = config.translator.target_lang.clone();
    let platform = CrowdinClient::new(&config.crowdin, target_lang.as_str());
    let options = cli.run_options(&target_lang);

    let translator = if options.mode.uses_model() {
        config.translator.require_api_key()?;
        let model = OpenAiChat::from_config(&config.translator);
        let translator = TokenSafeTranslator::from_config(model, &config.translator);
        let metadata = translator.metadata();
        tracing::info!("Translating into {} with {} ({})", target_lang, metadata.name, metadata.model);
        Some(translator)
    } else {
        None
    };

    let pipeline = Pipeline::new(&platform, translator.as_ref(), options);
    driver::run(&pipeline, &cli.target()).await?;

    Ok(())
}
