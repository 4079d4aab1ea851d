use anyhow::Result;
use cms_slug::application::commands::slugs::PopulateSlugsCommand;
use cms_slug::application::services::{ApplicationServices, SlugPorts};
use cms_slug::config::AppConfig;
use cms_slug::domain::slug::TableSchema;
use cms_slug::infrastructure::{
    database,
    repositories::{PageTree, SqliteRecordStore, StoreLiveVersionResolver},
    util::DeunicodeTransliterator,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let slug_config = config.slug_configuration()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;
    let pool = Arc::new(pool);

    let store = Arc::new(SqliteRecordStore::new(Arc::clone(&pool)));
    let page_schema = if slug_config.table.is_page_table() {
        slug_config.table.clone()
    } else {
        TableSchema::pages()
    };
    let tree = Arc::new(
        PageTree::new(store.clone(), page_schema).with_workspace(slug_config.workspace_id),
    );

    let services = ApplicationServices::new(
        slug_config,
        SlugPorts {
            store: store.clone(),
            writer: store.clone(),
            sites: tree.clone(),
            versions: Arc::new(StoreLiveVersionResolver::new(store.clone())),
            parents: tree,
            transliterator: Arc::new(DeunicodeTransliterator),
        },
    )?;

    let report = services
        .slug_commands
        .populate_missing(PopulateSlugsCommand {
            limit: config.populate_limit(),
        })
        .await?;

    tracing::info!(
        table = %report.table,
        examined = report.examined,
        updated = report.updated,
        "slug population finished"
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
