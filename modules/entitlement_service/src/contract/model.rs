//! Contract models for entitlement service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Fulfilment status of an entitlement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EntitlementStatus {
    #[default]
    Pending,
    Fulfilled,
    Canceled,
}

impl EntitlementStatus {
    pub const ALL: [EntitlementStatus; 3] = [Self::Pending, Self::Fulfilled, Self::Canceled];

    /// Wire and storage representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Fulfilled => "FULFILLED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for EntitlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntitlementStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                format!("unknown status '{s}', expected one of PENDING, FULFILLED, CANCELED")
            })
    }
}

/// Entitlement record as persisted in the `entitlements` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entitlement {
    /// Store-assigned primary key, immutable after creation
    pub id: i32,
    pub csp_id: Option<String>,
    pub quantity: Option<i32>,
    pub activation_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_eval: bool,
    pub entitlement_version: Option<String>,
    pub entitlement_group_id: Option<String>,
    pub uom: Option<String>,
    pub product_type: Option<String>,
    pub term: Option<String>,
    pub source_id: Option<String>,
    pub sku: Option<String>,
    pub ship_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub status: EntitlementStatus,
}

/// Input for creating an entitlement.
///
/// `Default` yields the documented creation defaults: every optional field
/// null, `is_eval = false`, `status = PENDING`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntitlement {
    pub csp_id: Option<String>,
    pub quantity: Option<i32>,
    pub activation_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_eval: bool,
    pub entitlement_version: Option<String>,
    pub entitlement_group_id: Option<String>,
    pub uom: Option<String>,
    pub product_type: Option<String>,
    pub term: Option<String>,
    pub source_id: Option<String>,
    pub sku: Option<String>,
    pub ship_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub status: EntitlementStatus,
}

/// Updatable fields of an entitlement.
///
/// `entitlementID` is not listed: it is immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntitlementField {
    CspId,
    Quantity,
    ActivationDate,
    EndDate,
    IsEval,
    EntitlementVersion,
    EntitlementGroupId,
    Uom,
    ProductType,
    Term,
    SourceId,
    Sku,
    ShipDate,
    StartDate,
    Status,
}

impl EntitlementField {
    /// The update allow-list, in column order
    pub const ALL: [EntitlementField; 15] = [
        Self::CspId,
        Self::Quantity,
        Self::ActivationDate,
        Self::EndDate,
        Self::IsEval,
        Self::EntitlementVersion,
        Self::EntitlementGroupId,
        Self::Uom,
        Self::ProductType,
        Self::Term,
        Self::SourceId,
        Self::Sku,
        Self::ShipDate,
        Self::StartDate,
        Self::Status,
    ];

    /// External field name (column name and JSON key)
    pub fn name(self) -> &'static str {
        match self {
            Self::CspId => "csp_ID",
            Self::Quantity => "quantity",
            Self::ActivationDate => "activation_date",
            Self::EndDate => "end_date",
            Self::IsEval => "is_eval",
            Self::EntitlementVersion => "entitlement_version",
            Self::EntitlementGroupId => "entitlement_group_ID",
            Self::Uom => "uom",
            Self::ProductType => "product_type",
            Self::Term => "term",
            Self::SourceId => "source_ID",
            Self::Sku => "sku",
            Self::ShipDate => "ship_date",
            Self::StartDate => "start_date",
            Self::Status => "status",
        }
    }

    /// Look up a field by its external name; `None` for anything outside the allow-list
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for EntitlementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single typed column assignment produced from a patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    CspId(Option<String>),
    Quantity(Option<i32>),
    ActivationDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    IsEval(bool),
    EntitlementVersion(Option<String>),
    EntitlementGroupId(Option<String>),
    Uom(Option<String>),
    ProductType(Option<String>),
    Term(Option<String>),
    SourceId(Option<String>),
    Sku(Option<String>),
    ShipDate(Option<NaiveDate>),
    StartDate(Option<NaiveDate>),
    Status(EntitlementStatus),
}

impl FieldUpdate {
    pub fn field(&self) -> EntitlementField {
        match self {
            Self::CspId(_) => EntitlementField::CspId,
            Self::Quantity(_) => EntitlementField::Quantity,
            Self::ActivationDate(_) => EntitlementField::ActivationDate,
            Self::EndDate(_) => EntitlementField::EndDate,
            Self::IsEval(_) => EntitlementField::IsEval,
            Self::EntitlementVersion(_) => EntitlementField::EntitlementVersion,
            Self::EntitlementGroupId(_) => EntitlementField::EntitlementGroupId,
            Self::Uom(_) => EntitlementField::Uom,
            Self::ProductType(_) => EntitlementField::ProductType,
            Self::Term(_) => EntitlementField::Term,
            Self::SourceId(_) => EntitlementField::SourceId,
            Self::Sku(_) => EntitlementField::Sku,
            Self::ShipDate(_) => EntitlementField::ShipDate,
            Self::StartDate(_) => EntitlementField::StartDate,
            Self::Status(_) => EntitlementField::Status,
        }
    }
}

/// Sparse partial update.
///
/// For nullable columns the outer `Option` says whether the field was
/// supplied at all, the inner one carries an explicit null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitlementPatch {
    pub csp_id: Option<Option<String>>,
    pub quantity: Option<Option<i32>>,
    pub activation_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub is_eval: Option<bool>,
    pub entitlement_version: Option<Option<String>>,
    pub entitlement_group_id: Option<Option<String>>,
    pub uom: Option<Option<String>>,
    pub product_type: Option<Option<String>>,
    pub term: Option<Option<String>>,
    pub source_id: Option<Option<String>>,
    pub sku: Option<Option<String>>,
    pub ship_date: Option<Option<NaiveDate>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub status: Option<EntitlementStatus>,
}

impl EntitlementPatch {
    /// The assignment for `field`, if the caller supplied one
    pub fn get(&self, field: EntitlementField) -> Option<FieldUpdate> {
        match field {
            EntitlementField::CspId => self.csp_id.clone().map(FieldUpdate::CspId),
            EntitlementField::Quantity => self.quantity.map(FieldUpdate::Quantity),
            EntitlementField::ActivationDate => {
                self.activation_date.map(FieldUpdate::ActivationDate)
            }
            EntitlementField::EndDate => self.end_date.map(FieldUpdate::EndDate),
            EntitlementField::IsEval => self.is_eval.map(FieldUpdate::IsEval),
            EntitlementField::EntitlementVersion => self
                .entitlement_version
                .clone()
                .map(FieldUpdate::EntitlementVersion),
            EntitlementField::EntitlementGroupId => self
                .entitlement_group_id
                .clone()
                .map(FieldUpdate::EntitlementGroupId),
            EntitlementField::Uom => self.uom.clone().map(FieldUpdate::Uom),
            EntitlementField::ProductType => {
                self.product_type.clone().map(FieldUpdate::ProductType)
            }
            EntitlementField::Term => self.term.clone().map(FieldUpdate::Term),
            EntitlementField::SourceId => self.source_id.clone().map(FieldUpdate::SourceId),
            EntitlementField::Sku => self.sku.clone().map(FieldUpdate::Sku),
            EntitlementField::ShipDate => self.ship_date.map(FieldUpdate::ShipDate),
            EntitlementField::StartDate => self.start_date.map(FieldUpdate::StartDate),
            EntitlementField::Status => self.status.map(FieldUpdate::Status),
        }
    }

    /// Fields the caller supplied, in allow-list order
    pub fn present_fields(&self) -> Vec<EntitlementField> {
        EntitlementField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_some())
            .collect()
    }
}

/// Caller-supplied restriction on which fields of a patch are applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMask {
    fields: BTreeSet<EntitlementField>,
}

impl FieldMask {
    /// Parse a comma-separated mask such as `"status, sku"`.
    ///
    /// Returns `None` for an empty or blank mask, which means "no mask".
    /// Names outside the allow-list are dropped.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        let fields = raw
            .split(',')
            .map(str::trim)
            .filter_map(EntitlementField::from_name)
            .collect();
        Some(Self { fields })
    }

    pub fn contains(&self, field: EntitlementField) -> bool {
        self.fields.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = EntitlementField> + '_ {
        self.fields.iter().copied()
    }
}

impl FromIterator<EntitlementField> for FieldMask {
    fn from_iter<I: IntoIterator<Item = EntitlementField>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Sparse conjunctive search filter; absent keys impose no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub sku: Option<String>,
    pub status: Option<EntitlementStatus>,
    pub csp_id: Option<String>,
    pub start_date_from: Option<NaiveDate>,
    pub start_date_to: Option<NaiveDate>,
    pub end_date_from: Option<NaiveDate>,
    pub end_date_to: Option<NaiveDate>,
}

impl SearchCriteria {
    /// True when no predicate is set, i.e. an unfiltered listing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

/// One page of results plus the total number of matching rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl<T> Page<T> {
    /// Number of items on this page
    pub fn count(&self) -> usize {
        self.items.len()
    }
}
