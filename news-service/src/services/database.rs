use crate::models::NewsItem;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

/// Long-lived handle on the news collection.
///
/// The driver pools connections internally, so cloning is cheap and every
/// request shares the same pool.
#[derive(Clone)]
pub struct NewsDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl NewsDb {
    /// Parses the URI and sets up the pool. No round-trip is made to the
    /// server until the first operation.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, collection = %collection, "MongoDB client ready");
        Ok(Self {
            client,
            db,
            collection: collection.to_string(),
        })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn news(&self) -> Collection<NewsItem> {
        self.db.collection(&self.collection)
    }

    /// Every item, in whatever order the store returns them.
    pub async fn list_news(&self) -> Result<Vec<NewsItem>, AppError> {
        let cursor = self.news().find(doc! {}, None).await?;
        let items: Vec<NewsItem> = cursor.try_collect().await?;
        Ok(items)
    }

    /// Inserts the item and returns it with the store-assigned id.
    pub async fn insert_news(&self, mut item: NewsItem) -> Result<NewsItem, AppError> {
        let result = self.news().insert_one(&item, None).await?;
        item.id = Some(result.inserted_id);
        Ok(item)
    }

    /// Overwrites all five fields and returns the document as it was before
    /// the write, or `None` when nothing matched.
    pub async fn replace_news(
        &self,
        id: &str,
        item: &NewsItem,
    ) -> Result<Option<NewsItem>, AppError> {
        let id = ObjectId::parse_str(id)?;

        Ok(self
            .news()
            .find_one_and_update(doc! { "_id": id }, item.replacement(), replace_options())
            .await?)
    }

    /// Returns whether a document was removed.
    pub async fn delete_news(&self, id: &str) -> Result<bool, AppError> {
        let id = ObjectId::parse_str(id)?;
        let result = self.news().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

/// Updates hand back the pre-write document.
fn replace_options() -> FindOneAndUpdateOptions {
    FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::Before)
        .upsert(false)
        .build()
}
