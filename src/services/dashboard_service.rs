use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::dto::response::{DashboardMaterialResponse, MaterialInfo},
    repositories::{AttemptRowRepository, MaterialRepository},
    services::analytics::{AnalyticsAggregator, OverviewReport, UserReport},
};

pub struct DashboardService {
    materials: Arc<dyn MaterialRepository>,
    attempt_rows: Arc<dyn AttemptRowRepository>,
}

impl DashboardService {
    pub fn new(
        materials: Arc<dyn MaterialRepository>,
        attempt_rows: Arc<dyn AttemptRowRepository>,
    ) -> Self {
        Self {
            materials,
            attempt_rows,
        }
    }

    pub async fn overview(&self, user_id: &str) -> AppResult<OverviewReport> {
        let rows = self.attempt_rows.find_by_user(user_id).await?;
        Ok(AnalyticsAggregator::overview(&rows))
    }

    pub async fn material(
        &self,
        material_id: &str,
        user_id: &str,
    ) -> AppResult<DashboardMaterialResponse> {
        let material = self
            .materials
            .find_by_id(material_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("material '{}' not found", material_id)))?;

        let rows = self
            .attempt_rows
            .find_by_material_and_user(material_id, user_id)
            .await?;

        Ok(DashboardMaterialResponse {
            material_info: MaterialInfo::from(&material),
            quiz_history: AnalyticsAggregator::material_history(&rows),
            per_question: material.quiz_stats.per_question,
            last_unsolved: material.quiz_stats.last_unsolved,
        })
    }

    pub async fn user(&self, user_id: &str) -> AppResult<UserReport> {
        let rows = self.attempt_rows.find_by_user(user_id).await?;
        Ok(AnalyticsAggregator::user_summary(&rows))
    }
}
