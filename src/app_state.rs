use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoAttemptRowRepository, MongoMaterialRepository},
    services::{attempt_service::AttemptService, dashboard_service::DashboardService},
};

#[derive(Clone)]
pub struct AppState {
    pub attempt_service: Arc<AttemptService>,
    pub dashboard_service: Arc<DashboardService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let material_repository = Arc::new(MongoMaterialRepository::new(&db, &config));
        material_repository.ensure_indexes().await?;

        let attempt_row_repository = Arc::new(MongoAttemptRowRepository::new(&db, &config));
        attempt_row_repository.ensure_indexes().await?;

        let attempt_service = Arc::new(AttemptService::new(
            material_repository.clone(),
            attempt_row_repository.clone(),
        ));
        let dashboard_service = Arc::new(DashboardService::new(
            material_repository,
            attempt_row_repository,
        ));

        Ok(Self {
            attempt_service,
            dashboard_service,
            db,
            config: Arc::new(config),
        })
    }
}
