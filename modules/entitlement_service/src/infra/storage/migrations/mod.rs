//! Database migrations for entitlement service
//!
//! A single migration bootstraps the `entitlements` table when it is missing.
//! Existing tables are left as they are.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_entitlements::Migration)]
    }
}

mod m20250101_000001_create_entitlements {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Entitlements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Entitlements::EntitlementId)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Entitlements::CspId).string_len(255))
                        .col(ColumnDef::new(Entitlements::Quantity).integer())
                        .col(ColumnDef::new(Entitlements::ActivationDate).date())
                        .col(ColumnDef::new(Entitlements::EndDate).date())
                        .col(
                            ColumnDef::new(Entitlements::IsEval)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Entitlements::EntitlementVersion).string_len(255))
                        .col(ColumnDef::new(Entitlements::EntitlementGroupId).string_len(255))
                        .col(ColumnDef::new(Entitlements::Uom).string_len(64))
                        .col(ColumnDef::new(Entitlements::ProductType).string_len(255))
                        .col(ColumnDef::new(Entitlements::Term).string_len(64))
                        .col(ColumnDef::new(Entitlements::SourceId).string_len(255))
                        .col(ColumnDef::new(Entitlements::Sku).string_len(255))
                        .col(ColumnDef::new(Entitlements::ShipDate).date())
                        .col(ColumnDef::new(Entitlements::StartDate).date())
                        .col(
                            ColumnDef::new(Entitlements::Status)
                                .string_len(16)
                                .not_null()
                                .default("PENDING"),
                        )
                        .to_owned(),
                )
                .await?;

            // Create indexes for the search predicates
            manager
                .create_index(
                    Index::create()
                        .name("idx_entitlements_sku")
                        .table(Entitlements::Table)
                        .col(Entitlements::Sku)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_entitlements_status")
                        .table(Entitlements::Table)
                        .col(Entitlements::Status)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Entitlements::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Entitlements {
        Table,
        #[sea_orm(iden = "entitlementID")]
        EntitlementId,
        #[sea_orm(iden = "csp_ID")]
        CspId,
        Quantity,
        ActivationDate,
        EndDate,
        IsEval,
        EntitlementVersion,
        #[sea_orm(iden = "entitlement_group_ID")]
        EntitlementGroupId,
        Uom,
        ProductType,
        Term,
        #[sea_orm(iden = "source_ID")]
        SourceId,
        Sku,
        ShipDate,
        StartDate,
        Status,
    }
}
