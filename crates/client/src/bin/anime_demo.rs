//! Walks a running service through a full create/rename/delete cycle.

use anime_client::{AnimeClient, ClientError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anime_demo=info,anime_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url = env_or("ANIME_API_URL", "http://localhost:8080");
    let client = AnimeClient::new(
        &base_url,
        env_or("ANIME_USERNAME", "devdojo"),
        env_or("ANIME_PASSWORD", "academy"),
    );
    tracing::info!(%base_url, "Talking to anime service");

    match client.get(1).await {
        Ok(anime) => tracing::info!(anime_id = anime.id, name = %anime.name, "Fetched anime 1"),
        Err(ClientError::Api { status: 404, .. }) => tracing::info!("Anime 1 does not exist yet"),
        Err(e) => return Err(e.into()),
    }

    let all = client.list_all().await?;
    tracing::info!(count = all.len(), "Listed all animes");

    let mut created = client.create("Samurai Champloo").await?;
    tracing::info!(anime_id = created.id, name = %created.name, "Created anime");

    created.name = "Samurai Champloo 2".to_string();
    client.replace(&created).await?;
    let renamed = client.get(created.id).await?;
    tracing::info!(anime_id = renamed.id, name = %renamed.name, "Renamed anime");

    client.delete(created.id).await?;
    tracing::info!(anime_id = created.id, "Deleted anime");

    Ok(())
}
