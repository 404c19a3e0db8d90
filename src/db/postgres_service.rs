use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

#[derive(Clone)]
pub struct PostgresService {
    pub(crate) db: DatabaseConnection,
}

impl PostgresService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        log::info!("Connecting to PostgreSQL...");
        let db = Database::connect(uri).await?;
        log::info!("Running migrations...");
        Migrator::up(&db, None).await?;
        log::info!("Connected to PostgreSQL.");
        Ok(Self { db })
    }
}
