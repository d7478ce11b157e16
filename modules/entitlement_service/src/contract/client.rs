//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with the entitlement service.
//! NO HTTP - direct function calls for performance.

use super::{
    error::EntitlementError,
    model::{
        Entitlement, EntitlementPatch, FieldMask, NewEntitlement, Page, PageRequest,
        SearchCriteria,
    },
};
use async_trait::async_trait;

/// Entitlement service API for inter-module communication
#[async_trait]
pub trait EntitlementsApi: Send + Sync {
    /// Create an entitlement and return the stored record
    async fn create_entitlement(
        &self,
        entitlement: NewEntitlement,
    ) -> Result<Entitlement, EntitlementError>;

    /// Get a single entitlement
    async fn get_entitlement(&self, id: i32) -> Result<Entitlement, EntitlementError>;

    /// List entitlements ordered by ID
    async fn list_entitlements(
        &self,
        page: PageRequest,
    ) -> Result<Page<Entitlement>, EntitlementError>;

    /// Filtered listing
    async fn search_entitlements(
        &self,
        criteria: SearchCriteria,
        page: PageRequest,
    ) -> Result<Page<Entitlement>, EntitlementError>;

    /// Partial update, optionally narrowed by a field mask
    async fn update_entitlement(
        &self,
        id: i32,
        patch: EntitlementPatch,
        mask: Option<FieldMask>,
    ) -> Result<Entitlement, EntitlementError>;

    /// Hard delete
    async fn delete_entitlement(&self, id: i32) -> Result<(), EntitlementError>;
}
