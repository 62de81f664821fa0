// Stores em memória usados pelos testes de serviço e de rotas
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use std::sync::Mutex;

use super::{DeleteAck, DocumentStore, InsertAck, UpdateAck};
use crate::models::bson_to_json;
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn with(seed: Vec<(&str, Vec<Document>)>) -> Self {
        let store = Self::default();
        {
            let mut collections = store.collections.lock().unwrap();
            for (name, docs) in seed {
                collections.entry(name.to_string()).or_default().extend(docs);
            }
        }
        store
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<InsertAck, AppError> {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };

        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(InsertAck {
            acknowledged: true,
            inserted_id: bson_to_json(id),
        })
    }

    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError> {
        Ok(self
            .documents(collection)
            .into_iter()
            .filter(|doc| matches(doc, &filter))
            .collect())
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError> {
        Ok(self
            .documents(collection)
            .into_iter()
            .find(|doc| matches(doc, &filter)))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> Result<UpdateAck, AppError> {
        let mut collections = self.collections.lock().unwrap();
        let target = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| matches(doc, &filter)));

        let (matched_count, modified_count) = match target {
            Some(doc) => {
                let before = doc.clone();
                for (key, value) in set {
                    doc.insert(key, value);
                }
                (1, u64::from(*doc != before))
            }
            None => (0, 0),
        };

        Ok(UpdateAck {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_id: None,
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteAck, AppError> {
        let mut collections = self.collections.lock().unwrap();
        let deleted_count = match collections.get_mut(collection) {
            Some(docs) => match docs.iter().position(|doc| matches(doc, &filter)) {
                Some(index) => {
                    docs.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };

        Ok(DeleteAck {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store whose every call fails, standing in for an unreachable cluster.
pub struct FailingStore;

fn unreachable_cluster() -> AppError {
    AppError::DatabaseError("server selection timeout: no available servers".to_string())
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert_one(&self, _: &str, _: Document) -> Result<InsertAck, AppError> {
        Err(unreachable_cluster())
    }

    async fn find(&self, _: &str, _: Document) -> Result<Vec<Document>, AppError> {
        Err(unreachable_cluster())
    }

    async fn find_one(&self, _: &str, _: Document) -> Result<Option<Document>, AppError> {
        Err(unreachable_cluster())
    }

    async fn update_one(&self, _: &str, _: Document, _: Document) -> Result<UpdateAck, AppError> {
        Err(unreachable_cluster())
    }

    async fn delete_one(&self, _: &str, _: Document) -> Result<DeleteAck, AppError> {
        Err(unreachable_cluster())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unreachable_cluster())
    }
}
