//! SeaORM repository implementations

use crate::contract::{Entitlement, FieldUpdate, NewEntitlement, PageRequest, SearchCriteria};
use crate::domain::repository::EntitlementRepository;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::sync::Arc;

use super::entity;
use super::mapper::active_model_for_updates;
use super::query::search_condition;

// ===== Entitlement Repository =====

pub struct SeaOrmEntitlementRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmEntitlementRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntitlementRepository for SeaOrmEntitlementRepository {
    async fn insert(&self, entitlement: &NewEntitlement) -> Result<i32> {
        let active: entity::ActiveModel = entitlement.into();

        let result = entity::Entity::insert(active)
            .exec(&*self.db)
            .await
            .context("failed to insert entitlement")?;

        Ok(result.last_insert_id)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Entitlement>> {
        let result = entity::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .with_context(|| format!("failed to load entitlement {id}"))?;

        Ok(result.map(Into::into))
    }

    async fn count(&self, criteria: &SearchCriteria) -> Result<u64> {
        entity::Entity::find()
            .filter(search_condition(criteria))
            .count(&*self.db)
            .await
            .context("failed to count entitlements")
    }

    async fn list(&self, criteria: &SearchCriteria, page: PageRequest) -> Result<Vec<Entitlement>> {
        let results = entity::Entity::find()
            .filter(search_condition(criteria))
            .order_by_asc(entity::Column::EntitlementId)
            .limit(page.limit)
            .offset(page.offset)
            .all(&*self.db)
            .await
            .context("failed to list entitlements")?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_fields(&self, id: i32, updates: &[FieldUpdate]) -> Result<u64> {
        let result = entity::Entity::update_many()
            .set(active_model_for_updates(updates))
            .filter(entity::Column::EntitlementId.eq(id))
            .exec(&*self.db)
            .await
            .with_context(|| format!("failed to update entitlement {id}"))?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: i32) -> Result<u64> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .with_context(|| format!("failed to delete entitlement {id}"))?;

        Ok(result.rows_affected)
    }
}
