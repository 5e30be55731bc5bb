use geoformat_api::ResolveError;
use geoformat_core::ServiceConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

fn lookup_timeout(config: &ServiceConfig) -> Duration {
    Duration::from_millis(config.directory.lookup_timeout_ms)
}

fn timed_out(timeout: Duration) -> ResolveError {
    ResolveError::DirectoryUnavailable(format!("lookup timed out after {:?}", timeout))
}

pub async fn run(
    config: &ServiceConfig,
    catalog: PathBuf,
    workspace: String,
    reference: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let directory = geoformat_runtime::open_directory(&catalog)?;
    let timeout = lookup_timeout(config);

    let qualified = tokio::time::timeout(timeout, directory.resolve(&workspace, &reference))
        .await
        .map_err(|_| timed_out(timeout))??;

    info!("Resolved '{}' in {} to {}", reference, workspace, qualified);
    println!("{}", qualified);
    Ok(())
}

pub async fn layers(
    config: &ServiceConfig,
    catalog: PathBuf,
    workspace: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let directory = geoformat_runtime::open_directory(&catalog)?;
    let timeout = lookup_timeout(config);

    let listing = tokio::time::timeout(timeout, directory.list(&workspace))
        .await
        .map_err(|_| timed_out(timeout))??;

    if listing.is_empty() {
        info!("Workspace {} has no layers or tables", workspace);
    } else {
        info!("Listed {} resources in {}", listing.len(), workspace);
    }
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
