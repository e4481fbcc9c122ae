//! Sale data model.
//!
//! A sale belongs to exactly one owner, fixed at creation time; the owner is
//! never taken from a caller-supplied payload.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserId;

/// Stable sale identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct SaleId(i64);

impl SaleId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the underlying integer.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a date string is not an ISO calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("date must be a calendar date in YYYY-MM-DD form")]
pub struct SaleDateParseError;

/// Calendar date of a sale.
///
/// Parsing is lenient about zero padding (`2011-2-2` is accepted) but the
/// serialized form is always zero padded (`2011-02-02`) so values round-trip
/// stably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "2011-02-02")]
pub struct SaleDate(NaiveDate);

impl SaleDate {
    /// Parse a date string, tolerating missing zero padding.
    pub fn parse(raw: &str) -> Result<Self, SaleDateParseError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| SaleDateParseError)
    }

    /// Access the underlying calendar date.
    pub const fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for SaleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<SaleDate> for String {
    fn from(value: SaleDate) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for SaleDate {
    type Error = SaleDateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Sale record.
///
/// ## Invariants
/// - `owner` is set from the authenticated caller at creation and never
///   changes afterwards.
/// - `sales_number` is a non-negative unit count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sale {
    /// Stable identifier.
    pub id: SaleId,
    /// Free-text product label; may be empty for partial entries.
    pub product: String,
    /// Revenue amount for this entry.
    pub revenue: f64,
    /// Units sold in this entry.
    pub sales_number: u32,
    /// Calendar date of the sale.
    pub date: SaleDate,
    /// Owning user, fixed at creation.
    #[serde(rename = "user_id")]
    pub owner: UserId,
}

/// Validated payload for creating or fully replacing a sale.
///
/// The schema is deliberately permissive: only the date is required, and the
/// remaining fields default so partial entries can be recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    /// Calendar date of the sale.
    pub date: SaleDate,
    /// Product label; defaults to empty.
    pub product: String,
    /// Units sold; defaults to zero.
    pub sales_number: u32,
    /// Revenue amount; defaults to zero.
    pub revenue: f64,
}

impl SaleDraft {
    /// Materialise the draft into a sale owned by `owner`.
    pub fn into_sale(self, id: SaleId, owner: UserId) -> Sale {
        Sale {
            id,
            product: self.product,
            revenue: self.revenue,
            sales_number: self.sales_number,
            date: self.date,
            owner,
        }
    }
}

/// Validated partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalePatch {
    /// Replacement date.
    pub date: Option<SaleDate>,
    /// Replacement product label.
    pub product: Option<String>,
    /// Replacement unit count.
    pub sales_number: Option<u32>,
    /// Replacement revenue amount.
    pub revenue: Option<f64>,
}

impl SalePatch {
    /// Apply the supplied fields onto an existing sale. The owner is not a
    /// patchable field.
    pub fn apply_to(&self, sale: &mut Sale) {
        if let Some(date) = self.date {
            sale.date = date;
        }
        if let Some(product) = &self.product {
            sale.product = product.clone();
        }
        if let Some(sales_number) = self.sales_number {
            sale.sales_number = sales_number;
        }
        if let Some(revenue) = self.revenue {
            sale.revenue = revenue;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("2011-2-2", "2011-02-02")]
    #[case("2011-02-02", "2011-02-02")]
    #[case("2010-12-1", "2010-12-01")]
    fn dates_render_zero_padded(#[case] input: &str, #[case] expected: &str) {
        let date = SaleDate::parse(input).expect("valid date");
        assert_eq!(date.to_string(), expected);
    }

    #[rstest]
    #[case("2011-13-01")]
    #[case("2011-02-30")]
    #[case("02-02-2011")]
    #[case("not a date")]
    #[case("")]
    fn invalid_dates_are_rejected(#[case] input: &str) {
        assert_eq!(SaleDate::parse(input), Err(SaleDateParseError));
    }

    #[rstest]
    fn sale_serializes_with_wire_field_names() {
        let sale = Sale {
            id: SaleId::new(1),
            product: "Product1".into(),
            revenue: 2.3,
            sales_number: 30,
            date: SaleDate::parse("2010-2-2").expect("valid date"),
            owner: UserId::new(1),
        };
        let value = serde_json::to_value(&sale).expect("sale serializes");
        assert_eq!(
            value,
            json!({
                "id": 1,
                "product": "Product1",
                "revenue": 2.3,
                "sales_number": 30,
                "date": "2010-02-02",
                "user_id": 1,
            })
        );
    }

    #[rstest]
    fn patch_leaves_unsupplied_fields_alone() {
        let mut sale = Sale {
            id: SaleId::new(1),
            product: "Product1".into(),
            revenue: 2.3,
            sales_number: 30,
            date: SaleDate::parse("2010-02-02").expect("valid date"),
            owner: UserId::new(1),
        };
        let patch = SalePatch {
            revenue: Some(56.0),
            ..SalePatch::default()
        };

        patch.apply_to(&mut sale);

        assert_eq!(sale.revenue, 56.0);
        assert_eq!(sale.product, "Product1");
        assert_eq!(sale.sales_number, 30);
        assert_eq!(sale.date.to_string(), "2010-02-02");
    }
}
