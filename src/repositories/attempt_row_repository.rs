use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{config::Config, db::Database, errors::AppResult, models::domain::AttemptRow};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptRowRepository: Send + Sync {
    async fn insert(&self, row: AttemptRow) -> AppResult<AttemptRow>;

    /// All of a user's attempts across materials, oldest first.
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<AttemptRow>>;

    /// One user's attempts on one material, ascending attempt number.
    async fn find_by_material_and_user(
        &self,
        material_id: &str,
        user_id: &str,
    ) -> AppResult<Vec<AttemptRow>>;
}

pub struct MongoAttemptRowRepository {
    collection: Collection<AttemptRow>,
}

impl MongoAttemptRowRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let collection = db.get_collection(&config.attempts_collection);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("creating indexes for quiz_performance collection");

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

        let material_user_index = IndexModel::builder()
            .keys(doc! { "material_id": 1, "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("material_user".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_index).await?;
        self.collection.create_index(material_user_index).await?;
        Ok(())
    }
}

#[async_trait]
impl AttemptRowRepository for MongoAttemptRowRepository {
    async fn insert(&self, row: AttemptRow) -> AppResult<AttemptRow> {
        self.collection.insert_one(&row).await?;
        Ok(row)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<AttemptRow>> {
        let rows = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(rows)
    }

    async fn find_by_material_and_user(
        &self,
        material_id: &str,
        user_id: &str,
    ) -> AppResult<Vec<AttemptRow>> {
        let rows = self
            .collection
            .find(doc! { "material_id": material_id, "user_id": user_id })
            .sort(doc! { "attempt_number": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(rows)
    }
}
