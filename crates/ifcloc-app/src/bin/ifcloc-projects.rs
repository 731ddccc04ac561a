//! Lists Crowdin projects to find the id for CROWDIN_PROJECT_ID.
//! Needs CROWDIN_PERSONAL_TOKEN and, for enterprise, ORGANIZATION.

use anyhow::{Context, Result};
use ifcloc_app::logging::{self, LogFormat};
use ifcloc_app::projects::print_projects;
use ifcloc_config::Config;
use ifcloc_crowdin::CrowdinClient;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    logging::init(LogFormat::Text);

    let config = Config::from_env().context("Invalid configuration")?;
    let client = CrowdinClient::new(&config.crowdin, config.translator.target_lang.as_str());

    let count = print_projects(&client, &mut std::io::stdout().lock()).await?;
    tracing::debug!("{} projects listed", count);

    Ok(())
}
