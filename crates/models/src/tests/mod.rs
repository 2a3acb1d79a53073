use migration::MigratorTrait;
use sea_orm::DatabaseConnection;



/// Fresh SQLite file under the temp dir with all migrations applied.
pub(crate) async fn temp_db() -> anyhow::Result<DatabaseConnection> {
    let path = std::env::temp_dir().join(format!("models_test_{}.db", uuid::Uuid::new_v4()));
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let db = crate::db::connect_url(&url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
