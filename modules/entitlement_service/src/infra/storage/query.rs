//! Search criteria to SQL condition translation
//!
//! Every criterion becomes one bound predicate; all predicates are ANDed.
//! The same condition feeds both the count and the page query.

use super::entity::{self, Column};
use crate::contract::SearchCriteria;
use sea_orm::{ColumnTrait, Condition};

pub fn search_condition(criteria: &SearchCriteria) -> Condition {
    let mut condition = Condition::all();

    if let Some(sku) = &criteria.sku {
        condition = condition.add(Column::Sku.eq(sku.as_str()));
    }
    if let Some(status) = criteria.status {
        condition = condition.add(Column::Status.eq(entity::Status::from(status)));
    }
    if let Some(csp_id) = &criteria.csp_id {
        condition = condition.add(Column::CspId.eq(csp_id.as_str()));
    }
    if let Some(from) = criteria.start_date_from {
        condition = condition.add(Column::StartDate.gte(from));
    }
    if let Some(to) = criteria.start_date_to {
        condition = condition.add(Column::StartDate.lte(to));
    }
    if let Some(from) = criteria.end_date_from {
        condition = condition.add(Column::EndDate.gte(from));
    }
    if let Some(to) = criteria.end_date_to {
        condition = condition.add(Column::EndDate.lte(to));
    }

    condition
}
