use std::path::Path;

use anyhow::Context;

use crate::{models::SeedData, store::Store};

pub async fn load_file(store: &Store, path: &Path) -> anyhow::Result<()> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading seed file {}", path.display()))?;
    let data: SeedData = serde_json::from_slice(&raw)
        .with_context(|| format!("parsing seed file {}", path.display()))?;

    let counts = (data.directors.len(), data.genres.len(), data.movies.len());
    let inserted = store.seed(data).await?;

    if inserted {
        tracing::info!(
            directors = counts.0,
            genres = counts.1,
            movies = counts.2,
            path = %path.display(),
            "seeded catalog"
        );
    } else {
        tracing::info!(path = %path.display(), "catalog not empty, skipping seed");
    }

    Ok(())
}
