//! Embed two queries with the DashScope native embedding service

use dashlm::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let embeddings = DashScope::from_env()?;

    let s1 = embeddings.embed_query("你好").await?;
    let s2 = embeddings.embed_query("你好,你的名字是？").await?;

    println!("{:?}", s1);
    println!("dimensions: {} / {}", s1.len(), s2.len());

    Ok(())
}
