//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity;
use crate::contract::{Entitlement, EntitlementStatus, FieldUpdate, NewEntitlement};
use sea_orm::ActiveValue::{NotSet, Set};

// ===== Status Conversions =====

impl From<entity::Status> for EntitlementStatus {
    fn from(status: entity::Status) -> Self {
        match status {
            entity::Status::Pending => Self::Pending,
            entity::Status::Fulfilled => Self::Fulfilled,
            entity::Status::Canceled => Self::Canceled,
        }
    }
}

impl From<EntitlementStatus> for entity::Status {
    fn from(status: EntitlementStatus) -> Self {
        match status {
            EntitlementStatus::Pending => Self::Pending,
            EntitlementStatus::Fulfilled => Self::Fulfilled,
            EntitlementStatus::Canceled => Self::Canceled,
        }
    }
}

// ===== Entitlement Conversions =====

impl From<entity::Model> for Entitlement {
    fn from(entity: entity::Model) -> Self {
        Self {
            id: entity.entitlement_id,
            csp_id: entity.csp_id,
            quantity: entity.quantity,
            activation_date: entity.activation_date,
            end_date: entity.end_date,
            is_eval: entity.is_eval,
            entitlement_version: entity.entitlement_version,
            entitlement_group_id: entity.entitlement_group_id,
            uom: entity.uom,
            product_type: entity.product_type,
            term: entity.term,
            source_id: entity.source_id,
            sku: entity.sku,
            ship_date: entity.ship_date,
            start_date: entity.start_date,
            status: entity.status.into(),
        }
    }
}

impl From<&NewEntitlement> for entity::ActiveModel {
    fn from(model: &NewEntitlement) -> Self {
        Self {
            entitlement_id: NotSet,
            csp_id: Set(model.csp_id.clone()),
            quantity: Set(model.quantity),
            activation_date: Set(model.activation_date),
            end_date: Set(model.end_date),
            is_eval: Set(model.is_eval),
            entitlement_version: Set(model.entitlement_version.clone()),
            entitlement_group_id: Set(model.entitlement_group_id.clone()),
            uom: Set(model.uom.clone()),
            product_type: Set(model.product_type.clone()),
            term: Set(model.term.clone()),
            source_id: Set(model.source_id.clone()),
            sku: Set(model.sku.clone()),
            ship_date: Set(model.ship_date),
            start_date: Set(model.start_date),
            status: Set(model.status.into()),
        }
    }
}

/// Build an active model that sets exactly the given columns and leaves
/// every other column untouched
pub fn active_model_for_updates(updates: &[FieldUpdate]) -> entity::ActiveModel {
    let mut active = entity::ActiveModel {
        entitlement_id: NotSet,
        csp_id: NotSet,
        quantity: NotSet,
        activation_date: NotSet,
        end_date: NotSet,
        is_eval: NotSet,
        entitlement_version: NotSet,
        entitlement_group_id: NotSet,
        uom: NotSet,
        product_type: NotSet,
        term: NotSet,
        source_id: NotSet,
        sku: NotSet,
        ship_date: NotSet,
        start_date: NotSet,
        status: NotSet,
    };
    for update in updates {
        apply_update(&mut active, update);
    }
    active
}

/// Setter for one updatable column
fn apply_update(active: &mut entity::ActiveModel, update: &FieldUpdate) {
    match update.clone() {
        FieldUpdate::CspId(v) => active.csp_id = Set(v),
        FieldUpdate::Quantity(v) => active.quantity = Set(v),
        FieldUpdate::ActivationDate(v) => active.activation_date = Set(v),
        FieldUpdate::EndDate(v) => active.end_date = Set(v),
        FieldUpdate::IsEval(v) => active.is_eval = Set(v),
        FieldUpdate::EntitlementVersion(v) => active.entitlement_version = Set(v),
        FieldUpdate::EntitlementGroupId(v) => active.entitlement_group_id = Set(v),
        FieldUpdate::Uom(v) => active.uom = Set(v),
        FieldUpdate::ProductType(v) => active.product_type = Set(v),
        FieldUpdate::Term(v) => active.term = Set(v),
        FieldUpdate::SourceId(v) => active.source_id = Set(v),
        FieldUpdate::Sku(v) => active.sku = Set(v),
        FieldUpdate::ShipDate(v) => active.ship_date = Set(v),
        FieldUpdate::StartDate(v) => active.start_date = Set(v),
        FieldUpdate::Status(v) => active.status = Set(v.into()),
    }
}
