//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{Entitlement, FieldUpdate, NewEntitlement, PageRequest, SearchCriteria};
use anyhow::Result;
use async_trait::async_trait;

/// Repository for the `entitlements` table
#[async_trait]
pub trait EntitlementRepository: Send + Sync {
    /// Insert a row and return the store-assigned ID
    async fn insert(&self, entitlement: &NewEntitlement) -> Result<i32>;

    /// Find a row by primary key
    async fn find_by_id(&self, id: i32) -> Result<Option<Entitlement>>;

    /// Count rows matching `criteria` (empty criteria counts everything)
    async fn count(&self, criteria: &SearchCriteria) -> Result<u64>;

    /// Page of rows matching `criteria`, ordered by ID ascending
    async fn list(&self, criteria: &SearchCriteria, page: PageRequest) -> Result<Vec<Entitlement>>;

    /// Apply all assignments to one row in a single statement, returning rows affected
    async fn update_fields(&self, id: i32, updates: &[FieldUpdate]) -> Result<u64>;

    /// Hard delete, returning rows affected
    async fn delete(&self, id: i32) -> Result<u64>;
}
