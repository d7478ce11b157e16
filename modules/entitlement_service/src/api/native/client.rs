//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    Entitlement, EntitlementError, EntitlementPatch, EntitlementsApi, FieldMask, NewEntitlement,
    Page, PageRequest, SearchCriteria,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service.
///
/// Page requests are passed through the service's clamping so in-process
/// callers get the same limits as HTTP callers.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }

    fn clamp(&self, page: PageRequest) -> PageRequest {
        let as_signed = |v: u64| i64::try_from(v).unwrap_or(i64::MAX);
        self.service
            .page_request(Some(as_signed(page.limit)), Some(as_signed(page.offset)))
    }
}

#[async_trait]
impl EntitlementsApi for NativeClient {
    async fn create_entitlement(
        &self,
        entitlement: NewEntitlement,
    ) -> Result<Entitlement, EntitlementError> {
        self.service.create(entitlement).await
    }

    async fn get_entitlement(&self, id: i32) -> Result<Entitlement, EntitlementError> {
        self.service.get_by_id(id).await
    }

    async fn list_entitlements(
        &self,
        page: PageRequest,
    ) -> Result<Page<Entitlement>, EntitlementError> {
        self.service.get_all(self.clamp(page)).await
    }

    async fn search_entitlements(
        &self,
        criteria: SearchCriteria,
        page: PageRequest,
    ) -> Result<Page<Entitlement>, EntitlementError> {
        self.service.search(&criteria, self.clamp(page)).await
    }

    async fn update_entitlement(
        &self,
        id: i32,
        patch: EntitlementPatch,
        mask: Option<FieldMask>,
    ) -> Result<Entitlement, EntitlementError> {
        self.service.update(id, &patch, mask.as_ref()).await
    }

    async fn delete_entitlement(&self, id: i32) -> Result<(), EntitlementError> {
        self.service.delete(id).await
    }
}
