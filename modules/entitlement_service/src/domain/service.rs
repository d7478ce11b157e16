//! Domain service - business logic orchestration

use super::repository::EntitlementRepository;
use super::update::plan_updates;
use super::validation::coerce_page;
use crate::config::Config;
use crate::contract::{
    Entitlement, EntitlementError, EntitlementPatch, FieldMask, NewEntitlement, Page, PageRequest,
    SearchCriteria,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Domain service for entitlement management.
///
/// Every write is followed by a read so callers always see what was
/// actually persisted. Multi-step operations (check then act) are separate
/// round trips, not a transaction: a concurrent delete in between surfaces
/// as `NotFound` from the second step.
pub struct Service {
    repo: Arc<dyn EntitlementRepository>,
    config: Config,
}

impl Service {
    /// Create a new service instance
    pub fn new(repo: Arc<dyn EntitlementRepository>, config: Config) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Clamp raw pagination input using this service's page-size settings
    pub fn page_request(&self, limit: Option<i64>, offset: Option<i64>) -> PageRequest {
        coerce_page(limit, offset, &self.config)
    }

    /// Insert a new entitlement and return the re-read record
    pub async fn create(&self, entitlement: NewEntitlement) -> Result<Entitlement, EntitlementError> {
        let id = self
            .repo
            .insert(&entitlement)
            .await
            .map_err(|e| storage_failure("creating entitlement", &e))?;

        info!(entitlement_id = id, "Entitlement created");
        self.get_by_id(id).await
    }

    /// Get a single entitlement
    pub async fn get_by_id(&self, id: i32) -> Result<Entitlement, EntitlementError> {
        match self.repo.find_by_id(id).await {
            Ok(Some(entitlement)) => Ok(entitlement),
            Ok(None) => {
                debug!(entitlement_id = id, "Entitlement not found");
                Err(EntitlementError::not_found(id))
            }
            Err(e) => Err(storage_failure("getting entitlement", &e)),
        }
    }

    /// Unfiltered page ordered by ID
    pub async fn get_all(&self, page: PageRequest) -> Result<Page<Entitlement>, EntitlementError> {
        self.query(&SearchCriteria::default(), page).await
    }

    /// Filtered page ordered by ID
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        page: PageRequest,
    ) -> Result<Page<Entitlement>, EntitlementError> {
        self.query(criteria, page).await
    }

    /// Partial update restricted to the allow-list, the supplied fields and the mask
    pub async fn update(
        &self,
        id: i32,
        patch: &EntitlementPatch,
        mask: Option<&FieldMask>,
    ) -> Result<Entitlement, EntitlementError> {
        let current = self.get_by_id(id).await?;

        let updates = plan_updates(patch, mask);
        if updates.is_empty() {
            debug!(entitlement_id = id, "No updatable fields supplied, returning current record");
            return Ok(current);
        }

        let fields: Vec<&str> = updates.iter().map(|u| u.field().name()).collect();
        self.repo
            .update_fields(id, &updates)
            .await
            .map_err(|e| storage_failure("updating entitlement", &e))?;

        info!(entitlement_id = id, fields = ?fields, "Entitlement updated");
        self.get_by_id(id).await
    }

    /// Hard delete after an existence check
    pub async fn delete(&self, id: i32) -> Result<(), EntitlementError> {
        self.get_by_id(id).await?;

        let affected = self
            .repo
            .delete(id)
            .await
            .map_err(|e| storage_failure("deleting entitlement", &e))?;

        if affected == 0 {
            // Removed by someone else between the check and the delete
            return Err(EntitlementError::not_found(id));
        }

        info!(entitlement_id = id, "Entitlement deleted");
        Ok(())
    }

    // ===== Helper Methods =====

    /// Count and page with the identical filter so `total` matches `items`
    async fn query(
        &self,
        criteria: &SearchCriteria,
        page: PageRequest,
    ) -> Result<Page<Entitlement>, EntitlementError> {
        let total = self
            .repo
            .count(criteria)
            .await
            .map_err(|e| storage_failure("counting entitlements", &e))?;

        let items = self
            .repo
            .list(criteria, page)
            .await
            .map_err(|e| storage_failure("listing entitlements", &e))?;

        debug!(
            total,
            count = items.len(),
            limit = page.limit,
            offset = page.offset,
            filtered = !criteria.is_empty(),
            "Entitlements queried"
        );

        Ok(Page {
            items,
            total,
            limit: page.limit,
            offset: page.offset,
        })
    }
}

fn storage_failure(action: &str, error: &anyhow::Error) -> EntitlementError {
    error!(error = %format!("{error:#}"), "Error {action}");
    EntitlementError::storage(error)
}
