use async_trait::async_trait;
use mongodb::{bson, bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    models::domain::{MasteryState, StudyMaterial},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaterialRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<StudyMaterial>>;

    /// Replace the material's mastery snapshot. Must be atomic relative to
    /// concurrent writers for the same id; concurrent attempts on one
    /// material are otherwise not serialized by this service.
    async fn update_quiz_stats(&self, id: &str, stats: &MasteryState) -> AppResult<()>;
}

pub struct MongoMaterialRepository {
    collection: Collection<StudyMaterial>,
}

impl MongoMaterialRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let collection = db.get_collection(&config.materials_collection);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("creating indexes for study_materials collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().name("user_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_index).await?;
        Ok(())
    }
}

#[async_trait]
impl MaterialRepository for MongoMaterialRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<StudyMaterial>> {
        let material = self.collection.find_one(doc! { "id": id }).await?;
        Ok(material)
    }

    async fn update_quiz_stats(&self, id: &str, stats: &MasteryState) -> AppResult<()> {
        let stats_bson = bson::to_bson(stats)?;
        self.collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": { "quiz_stats": stats_bson } },
            )
            .await?;
        Ok(())
    }
}
