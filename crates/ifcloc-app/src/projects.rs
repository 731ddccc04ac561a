use std::io::Write;

use anyhow::{Context, Result};
use ifcloc_crowdin::CrowdinClient;

/// Print `<id> - <name>` for every project the token can see
pub async fn print_projects(client: &CrowdinClient, out: &mut impl Write) -> Result<usize> {
    let projects = client
        .list_projects()
        .await
        .context("Failed to list projects")?;

    for project in &projects {
        writeln!(out, "{} - {}", project.id, project.name)?;
    }

    Ok(projects.len())
}
