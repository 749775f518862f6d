use std::sync::Arc;

use next_crm::{api, microsvc, Config, Crm, Fixtures, InMemoryDocumentStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let fixtures = match &config.fixtures {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading fixtures");
            Fixtures::from_path(path)?
        }
        // Without fixtures only Administrator may write
        None => Fixtures::default(),
    };

    let store = InMemoryDocumentStore::new();
    let written = fixtures.load_into(&store)?;
    tracing::info!(records = written, "store seeded");

    let crm = Crm::new(store, fixtures.permissions(), fixtures.metadata())
        .with_link_matching(config.link_matching);
    let service = Arc::new(api::service(crm));

    tracing::info!(matching = %config.link_matching, "starting next-crm");
    microsvc::serve(service, &config.server_address).await?;
    Ok(())
}
