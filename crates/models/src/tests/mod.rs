use migration::MigratorTrait;
use sea_orm::DatabaseConnection;


/// Connect and migrate, or `None` when no database is configured for this run.
pub(crate) async fn setup_test_db() -> anyhow::Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let db = crate::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await {
        // concurrent test threads may race on the first migration
        eprintln!("migrations notice: {}", e);
    }
    Ok(Some(db))
}
