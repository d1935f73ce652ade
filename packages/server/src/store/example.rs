use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};
use serde_json::Value;
use uuid::Uuid;

use crate::entity::example;

/// Values written by create and full update.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleFields {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub metadata: Value,
}

/// Fields written by a partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExamplePatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub content: Option<String>,
    pub metadata: Option<Value>,
}

impl ExamplePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// CRUD over the `example` table.
///
/// Works on any connection, so callers can run several operations inside
/// one transaction.
pub struct ExampleStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ExampleStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(&self, fields: ExampleFields) -> Result<example::Model, DbErr> {
        let now = Utc::now();
        let model = example::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(fields.title),
            description: Set(fields.description),
            content: Set(fields.content),
            metadata: Set(fields.metadata),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(self.conn).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<example::Model>, DbErr> {
        example::Entity::find_by_id(id.to_string())
            .one(self.conn)
            .await
    }

    /// One page of examples, newest first, plus the total row count.
    pub async fn list(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<example::Model>, u64), DbErr> {
        let total = example::Entity::find().count(self.conn).await?;

        let items = example::Entity::find()
            .order_by_desc(example::Column::CreatedAt)
            .order_by_desc(example::Column::Id)
            .offset(Some(offset))
            .limit(Some(limit))
            .all(self.conn)
            .await?;

        Ok((items, total))
    }

    /// Replace all mutable fields. Returns `None` if the example does not exist.
    pub async fn update(
        &self,
        id: &str,
        fields: ExampleFields,
    ) -> Result<Option<example::Model>, DbErr> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: example::ActiveModel = existing.into();
        active.title = Set(fields.title);
        active.description = Set(fields.description);
        active.content = Set(fields.content);
        active.metadata = Set(fields.metadata);
        active.updated_at = Set(Utc::now());

        active.update(self.conn).await.map(Some)
    }

    /// Write only the supplied fields. Returns `None` if the example does not exist.
    ///
    /// An empty patch returns the stored row without touching `updated_at`.
    pub async fn patch(
        &self,
        id: &str,
        patch: ExamplePatch,
    ) -> Result<Option<example::Model>, DbErr> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(existing));
        }

        let mut active: example::ActiveModel = existing.into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(content) = patch.content {
            active.content = Set(content);
        }
        if let Some(metadata) = patch.metadata {
            active.metadata = Set(metadata);
        }
        active.updated_at = Set(Utc::now());

        active.update(self.conn).await.map(Some)
    }

    /// Hard delete. Returns `false` if no row matched.
    pub async fn delete(&self, id: &str) -> Result<bool, DbErr> {
        let result = example::Entity::delete_by_id(id.to_string())
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
