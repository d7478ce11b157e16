//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Entitlements table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "entitlements")]
pub struct Model {
    /// Auto-increment primary key
    #[sea_orm(primary_key, column_name = "entitlementID")]
    pub entitlement_id: i32,

    #[sea_orm(column_name = "csp_ID")]
    pub csp_id: Option<String>,

    pub quantity: Option<i32>,

    pub activation_date: Option<Date>,

    pub end_date: Option<Date>,

    pub is_eval: bool,

    pub entitlement_version: Option<String>,

    #[sea_orm(column_name = "entitlement_group_ID")]
    pub entitlement_group_id: Option<String>,

    pub uom: Option<String>,

    pub product_type: Option<String>,

    pub term: Option<String>,

    #[sea_orm(column_name = "source_ID")]
    pub source_id: Option<String>,

    pub sku: Option<String>,

    pub ship_date: Option<Date>,

    pub start_date: Option<Date>,

    pub status: Status,
}

/// Stored form of the entitlement status
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Status {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "FULFILLED")]
    Fulfilled,
    #[sea_orm(string_value = "CANCELED")]
    Canceled,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
