use std::time::Duration;

use configs::DatabaseConfig;
use mongodb::{bson::doc, options::ClientOptions, Client, Collection, Database};
use tracing::info;

use crate::student::Student;

/// Connect using the pool and timeout settings from config and ping once so a
/// dead store fails startup instead of the first request.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<Database> {
    let mut opts = ClientOptions::parse(cfg.url.as_str()).await?;
    opts.app_name = Some("student-records".to_string());
    opts.max_pool_size = Some(cfg.max_pool_size);
    opts.min_pool_size = Some(cfg.min_pool_size);
    opts.connect_timeout = Some(Duration::from_secs(cfg.connect_timeout_secs));
    opts.server_selection_timeout = Some(Duration::from_secs(cfg.server_selection_timeout_secs));

    let client = Client::with_options(opts)?;
    let db = client.database(&cfg.name);
    db.run_command(doc! { "ping": 1 }).await?;
    info!(database = %cfg.name, "connected to mongodb");
    Ok(db)
}

pub fn students(db: &Database, collection: &str) -> Collection<Student> {
    db.collection::<Student>(collection)
}
