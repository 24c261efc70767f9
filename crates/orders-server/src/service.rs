//! Entity CRUD and the affected-rows-to-status protocol.
//!
//! [`EntityService`] owns the [`StoreGateway`] and implements list, create,
//! update, upsert, and delete generically over [`Entity`]. Each write
//! returns a [`WriteOutcome`]; store failures come back as
//! [`ApiError::Store`]. Handlers only translate between HTTP and these calls.
//!
//! | Operation | rows > 0 | rows == 0 |
//! |---|---|---|
//! | create | 201 | 400 |
//! | update | 200 | 400 |
//! | upsert | 200 (update) / 201 (create) | 400 |
//! | delete | 200 | 400 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orders_storage::{statement, Entity, StoreGateway};

use crate::error::ApiError;
use crate::validate::{EntityKey, Validated};

/// Result of a write that reached the store without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    Deleted,
    /// The statement matched no row.
    NotApplied,
}

impl WriteOutcome {
    pub fn status(self) -> StatusCode {
        match self {
            WriteOutcome::Created => StatusCode::CREATED,
            WriteOutcome::Updated | WriteOutcome::Deleted => StatusCode::OK,
            // Kept at 400 for existing clients.
            WriteOutcome::NotApplied => StatusCode::BAD_REQUEST,
        }
    }
}

/// Writes respond with an empty body.
impl IntoResponse for WriteOutcome {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}

/// Generic CRUD over the backed relations.
#[derive(Clone)]
pub struct EntityService {
    store: StoreGateway,
}

impl EntityService {
    pub fn new(store: StoreGateway) -> Self {
        EntityService { store }
    }

    pub fn store(&self) -> &StoreGateway {
        &self.store
    }

    /// Every row of `E`, ordered by key.
    pub async fn list<E: Entity>(&self) -> Result<Vec<E>, ApiError> {
        let rows = self.store.fetch_all::<E>(statement::select_all::<E>()).await?;
        Ok(rows)
    }

    pub async fn create<E: Entity>(&self, record: Validated<E>) -> Result<WriteOutcome, ApiError> {
        let affected = self
            .store
            .execute(statement::insert::<E>(record.into_values()))
            .await?;
        Ok(written::<E>("create", affected, WriteOutcome::Created))
    }

    /// Overwrites every attribute of the row addressed by `key`. The body
    /// key is written through, so a differing body key renames the row.
    pub async fn update<E: Entity>(
        &self,
        key: EntityKey<E>,
        record: Validated<E>,
    ) -> Result<WriteOutcome, ApiError> {
        let affected = self
            .store
            .execute(statement::update::<E>(key.into_value(), record.into_values()))
            .await?;
        Ok(written::<E>("update", affected, WriteOutcome::Updated))
    }

    /// Update, and only once that has been observed to match nothing,
    /// create with the same attributes.
    pub async fn upsert<E: Entity>(
        &self,
        key: EntityKey<E>,
        record: Validated<E>,
    ) -> Result<WriteOutcome, ApiError> {
        match self.update(key, record.clone()).await? {
            WriteOutcome::NotApplied => self.create(record).await,
            outcome => Ok(outcome),
        }
    }

    pub async fn delete<E: Entity>(&self, key: EntityKey<E>) -> Result<WriteOutcome, ApiError> {
        let affected = self
            .store
            .execute(statement::delete::<E>(key.into_value()))
            .await?;
        Ok(written::<E>("delete", affected, WriteOutcome::Deleted))
    }
}

fn written<E: Entity>(op: &'static str, affected: usize, applied: WriteOutcome) -> WriteOutcome {
    if affected > 0 {
        tracing::debug!(entity = E::NAME, op, affected, "write applied");
        applied
    } else {
        tracing::debug!(entity = E::NAME, op, "write matched no row");
        WriteOutcome::NotApplied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate;
    use orders_storage::{Agent, PoolConfig, Value};
    use serde_json::json;

    fn service() -> EntityService {
        EntityService::new(StoreGateway::temporary(PoolConfig::default()).unwrap())
    }

    fn agent(v: serde_json::Value) -> Validated<Agent> {
        validate::record::<Agent>(&serde_json::to_vec(&v).unwrap()).unwrap()
    }

    fn key(code: &str) -> EntityKey<Agent> {
        validate::path_key::<Agent>(code).unwrap()
    }

    #[test]
    fn outcome_statuses() {
        assert_eq!(WriteOutcome::Created.status(), StatusCode::CREATED);
        assert_eq!(WriteOutcome::Updated.status(), StatusCode::OK);
        assert_eq!(WriteOutcome::Deleted.status(), StatusCode::OK);
        assert_eq!(WriteOutcome::NotApplied.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upsert_creates_then_updates() {
        let svc = service();
        let body = json!({"AGENT_CODE": "A001", "AGENT_NAME": "Alpha"});

        let first = svc.upsert(key("A001"), agent(body.clone())).await.unwrap();
        assert_eq!(first, WriteOutcome::Created);

        let second = svc
            .upsert(key("A001"), agent(json!({"AGENT_CODE": "A001", "AGENT_NAME": "Beta"})))
            .await
            .unwrap();
        assert_eq!(second, WriteOutcome::Updated);

        let agents = svc.list::<Agent>().await.unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].agent_name.as_deref(), Some("Beta"));
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_rows_are_not_applied() {
        let svc = service();
        let outcome = svc
            .update(key("NOPE"), agent(json!({"AGENT_CODE": "NOPE"})))
            .await
            .unwrap();
        assert_eq!(outcome, WriteOutcome::NotApplied);
        assert_eq!(svc.delete(key("NOPE")).await.unwrap(), WriteOutcome::NotApplied);
        assert!(svc.list::<Agent>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_create_is_a_store_error() {
        let svc = service();
        let body = json!({"AGENT_CODE": "A001"});
        assert_eq!(svc.create(agent(body.clone())).await.unwrap(), WriteOutcome::Created);

        let err = svc.create(agent(body)).await.unwrap_err();
        match err {
            ApiError::Store(e) => assert!(e.is_constraint_violation()),
            other => panic!("expected store error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn body_key_is_written_through_on_update() {
        let svc = service();
        svc.create(agent(json!({"AGENT_CODE": "A001"}))).await.unwrap();

        let outcome = svc
            .update(key("A001"), agent(json!({"AGENT_CODE": "A002"})))
            .await
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Updated);

        let codes: Vec<_> = svc
            .list::<Agent>()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.agent_code)
            .collect();
        assert_eq!(codes, vec!["A002".to_string()]);
        assert_eq!(key("A002").value(), &Value::Text("A002".to_string()));
    }
}
