// Camada de acesso a documentos: quatro coleções de um único banco lógico
pub mod mongo;
#[cfg(test)]
pub mod memory;

pub use mongo::MongoDB;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::utils::AppError;

pub const USERS: &str = "users";
pub const SCHOLARSHIPS: &str = "scholarships";
pub const REVIEWS: &str = "reviews";
pub const APPLICATIONS: &str = "applications";

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    #[schema(value_type = String)]
    pub inserted_id: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    #[schema(value_type = Option<String>)]
    pub upserted_id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Schema-less document storage addressed by collection name.
///
/// Filters are equality matches on top-level fields. Updates set exactly
/// the given fields on the first matching document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<InsertAck, AppError>;

    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError>;

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError>;

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> Result<UpdateAck, AppError>;

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteAck, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

/// Handle to one named collection.
#[derive(Clone)]
pub struct Collection {
    name: &'static str,
    store: Arc<dyn DocumentStore>,
}

impl Collection {
    pub fn new(name: &'static str, store: Arc<dyn DocumentStore>) -> Self {
        Self { name, store }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn insert_one(&self, document: Document) -> Result<InsertAck, AppError> {
        self.store.insert_one(self.name, document).await
    }

    pub async fn find(&self, filter: Document) -> Result<Vec<Document>, AppError> {
        self.store.find(self.name, filter).await
    }

    pub async fn find_one(&self, filter: Document) -> Result<Option<Document>, AppError> {
        self.store.find_one(self.name, filter).await
    }

    pub async fn update_one(&self, filter: Document, set: Document) -> Result<UpdateAck, AppError> {
        self.store.update_one(self.name, filter, set).await
    }

    pub async fn delete_one(&self, filter: Document) -> Result<DeleteAck, AppError> {
        self.store.delete_one(self.name, filter).await
    }
}

/// The four collections handlers work with, sharing one store connection.
#[derive(Clone)]
pub struct Collections {
    pub users: Collection,
    pub scholarships: Collection,
    pub reviews: Collection,
    pub applications: Collection,
    store: Arc<dyn DocumentStore>,
}

impl Collections {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: Collection::new(USERS, store.clone()),
            scholarships: Collection::new(SCHOLARSHIPS, store.clone()),
            reviews: Collection::new(REVIEWS, store.clone()),
            applications: Collection::new(APPLICATIONS, store.clone()),
            store,
        }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }
}

/// Parses an identifier taken from a request path.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw)
        .map_err(|_| AppError::InvalidRequest(format!("'{}' is not a valid id", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let oid = parse_object_id("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        assert_eq!(oid.to_hex(), "65a1f0c2e4b0a1b2c3d4e5f6");

        for raw in ["", "S1", "65a1f0c2e4b0a1b2c3d4e5f", "zza1f0c2e4b0a1b2c3d4e5f6"] {
            assert!(matches!(parse_object_id(raw), Err(AppError::InvalidRequest(_))));
        }
    }

    #[test]
    fn test_collections_are_named() {
        let collections = Collections::new(Arc::new(memory::MemoryStore::default()));
        assert_eq!(collections.users.name(), "users");
        assert_eq!(collections.scholarships.name(), "scholarships");
        assert_eq!(collections.reviews.name(), "reviews");
        assert_eq!(collections.applications.name(), "applications");
    }
}
