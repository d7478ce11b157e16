//! Module declaration and lifecycle implementation
//!
//! The hosting binary drives the lifecycle: `migrate`, then `init`, then
//! `register_rest`.

use crate::api::native::NativeClient;
use crate::api::rest::{error::ErrorMapper, routes};
use crate::config::Config;
use crate::contract::EntitlementsApi;
use crate::domain::{EntitlementRepository, Service};
use crate::infra::storage::repositories::SeaOrmEntitlementRepository;
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Entitlement service module
pub struct EntitlementServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for EntitlementServiceModule {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl EntitlementServiceModule {
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            service: RwLock::new(None),
        }
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    /// Create the `entitlements` table if it does not exist yet
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Entitlement service migrations completed");
        Ok(())
    }

    /// Build the SeaORM-backed service
    pub fn init(&self, db: Arc<DatabaseConnection>) -> Result<()> {
        let repo = Arc::new(SeaOrmEntitlementRepository::new(db));
        self.init_with_repository(repo)
    }

    /// Build the service over any repository implementation
    pub fn init_with_repository(&self, repo: Arc<dyn EntitlementRepository>) -> Result<()> {
        let config = self.config();
        tracing::debug!(?config, "Initializing entitlement service");

        let service = Arc::new(Service::new(repo, config));
        *self.service.write() = Some(service);

        tracing::info!("Entitlement service initialized");
        Ok(())
    }

    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client over the initialized service
    pub fn client(&self) -> Result<Arc<dyn EntitlementsApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }

    /// Mount the `/entitlements` routes and the catch-all 404 on `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;
        let errors = ErrorMapper::new(self.config.read().include_error_stack);

        tracing::info!("Registering entitlement service REST routes");
        routes::register_routes(router, service, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninitialized_module_refuses_routes() {
        let module = EntitlementServiceModule::default();
        assert!(module.service().is_err());
        assert!(module.register_rest(axum::Router::new()).is_err());
    }
}
