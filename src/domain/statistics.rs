//! Comparative sales statistics.
//!
//! The aggregator makes a single linear pass over the whole sale table and
//! partitions records into the caller's cohort and everyone else's. Auxiliary
//! state is bounded by the number of distinct products the caller sold; the
//! per-product sums live in an insertion-ordered map so tie-breaking is
//! deterministic (first product seen in scan order wins).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::sale::{Sale, SaleId};
use super::user::UserId;

/// The caller's single highest-revenue sale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopRevenueSale {
    /// Identifier of the winning sale.
    pub sale_id: SaleId,
    /// Its revenue amount.
    pub revenue: f64,
}

/// A product that wins one of the per-product rankings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductWinner {
    /// Label of the winning product.
    pub product_name: String,
}

/// Comparative report for one caller against the whole sale table.
///
/// Metrics that are undefined for the caller's data are `null` rather than
/// an error: an average is `null` when the cohort sold zero units, and the
/// winner fields are `null` when the caller has no sales at all. The
/// endpoint serving this report always succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SaleStatistics {
    /// Caller's revenue per unit sold: `sum(revenue) / sum(sales_number)`
    /// over the caller's sales only.
    pub average_sales_for_current_user: Option<f64>,
    /// The same ratio over every sale in the table, the caller's included.
    pub average_sale_all_user: Option<f64>,
    /// The caller's single sale with the highest revenue; first-seen wins
    /// ties.
    pub highest_revenue_sale_for_current_user: Option<TopRevenueSale>,
    /// The caller's product with the highest summed revenue.
    pub product_highest_revenue_for_current_user: Option<ProductWinner>,
    /// The caller's product with the highest summed unit count; computed
    /// independently of the revenue ranking.
    pub product_highest_sales_number_for_current_user: Option<ProductWinner>,
}

#[derive(Debug, Default, Clone, Copy)]
struct CohortTotals {
    units: u64,
    revenue: f64,
}

impl CohortTotals {
    fn absorb(&mut self, sale: &Sale) {
        self.units += u64::from(sale.sales_number);
        self.revenue += sale.revenue;
    }

    /// Revenue per unit; undefined when no units were sold.
    #[expect(clippy::cast_precision_loss, reason = "unit counts stay far below 2^52")]
    fn per_unit(self) -> Option<f64> {
        (self.units != 0).then(|| self.revenue / self.units as f64)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct ProductTotals {
    revenue: f64,
    units: u64,
}

/// Compile the comparative report for `caller` from a scan of `sales`.
///
/// Single pass, O(n) in sale count, O(k) auxiliary space for the caller's k
/// distinct products.
pub fn compile_statistics<'a>(
    caller: UserId,
    sales: impl IntoIterator<Item = &'a Sale>,
) -> SaleStatistics {
    let mut own = CohortTotals::default();
    let mut others = CohortTotals::default();
    let mut top_sale: Option<TopRevenueSale> = None;
    let mut products: IndexMap<&str, ProductTotals> = IndexMap::new();

    for sale in sales {
        if sale.owner == caller {
            own.absorb(sale);

            // Strict comparison keeps the first-seen sale on ties.
            if top_sale.is_none_or(|top| sale.revenue > top.revenue) {
                top_sale = Some(TopRevenueSale {
                    sale_id: sale.id,
                    revenue: sale.revenue,
                });
            }

            let totals = products.entry(sale.product.as_str()).or_default();
            totals.revenue += sale.revenue;
            totals.units += u64::from(sale.sales_number);
        } else {
            others.absorb(sale);
        }
    }

    let everyone = CohortTotals {
        units: own.units + others.units,
        revenue: own.revenue + others.revenue,
    };

    let mut best_revenue: Option<(&str, f64)> = None;
    let mut best_units: Option<(&str, u64)> = None;
    for (name, totals) in &products {
        if best_revenue.is_none_or(|(_, revenue)| totals.revenue > revenue) {
            best_revenue = Some((name, totals.revenue));
        }
        if best_units.is_none_or(|(_, units)| totals.units > units) {
            best_units = Some((name, totals.units));
        }
    }

    SaleStatistics {
        average_sales_for_current_user: own.per_unit(),
        average_sale_all_user: everyone.per_unit(),
        highest_revenue_sale_for_current_user: top_sale,
        product_highest_revenue_for_current_user: best_revenue.map(|(name, _)| ProductWinner {
            product_name: name.to_owned(),
        }),
        product_highest_sales_number_for_current_user: best_units.map(|(name, _)| ProductWinner {
            product_name: name.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sale::SaleDate;
    use rstest::rstest;
    use serde_json::json;

    fn sale(id: i64, owner: i64, product: &str, sales_number: u32, revenue: f64) -> Sale {
        Sale {
            id: SaleId::new(id),
            product: product.into(),
            revenue,
            sales_number,
            date: SaleDate::parse("2010-02-02").expect("valid fixture date"),
            owner: UserId::new(owner),
        }
    }

    /// Canonical two-user data set with known hand-computed metrics.
    fn fixture_table() -> Vec<Sale> {
        vec![
            sale(1, 1, "Product1", 30, 2.3),
            sale(2, 1, "Product1", 20, 1.3),
            sale(3, 1, "Product2", 10, 2.3),
            sale(4, 2, "Product2", 32, 4.3),
            sale(5, 2, "Product3", 21, 0.3),
            sale(6, 2, "Product3", 11, 7.3),
        ]
    }

    fn round_to(value: f64, places: i32) -> f64 {
        let factor = 10f64.powi(places);
        (value * factor).round() / factor
    }

    #[rstest]
    fn report_matches_reference_data_set() {
        let table = fixture_table();
        let report = compile_statistics(UserId::new(1), &table);

        let own_average = report
            .average_sales_for_current_user
            .expect("caller has sales");
        assert_eq!(round_to(own_average, 3), 0.098);

        let all_average = report.average_sale_all_user.expect("table has sales");
        assert_eq!(round_to(all_average, 4), 0.1435);

        assert_eq!(
            report.highest_revenue_sale_for_current_user,
            Some(TopRevenueSale {
                sale_id: SaleId::new(1),
                revenue: 2.3,
            })
        );
        assert_eq!(
            report.product_highest_revenue_for_current_user,
            Some(ProductWinner {
                product_name: "Product1".into(),
            })
        );
        assert_eq!(
            report.product_highest_sales_number_for_current_user,
            Some(ProductWinner {
                product_name: "Product1".into(),
            })
        );
    }

    #[rstest]
    fn revenue_tie_keeps_first_sale_in_scan_order() {
        // Sales 1 and 3 both carry revenue 2.3; the earlier one must win.
        let table = fixture_table();
        let report = compile_statistics(UserId::new(1), &table);
        let top = report
            .highest_revenue_sale_for_current_user
            .expect("caller has sales");
        assert_eq!(top.sale_id, SaleId::new(1));
    }

    #[rstest]
    fn product_tie_keeps_first_seen_product() {
        let table = vec![
            sale(1, 1, "Alpha", 5, 3.0),
            sale(2, 1, "Beta", 5, 3.0),
        ];
        let report = compile_statistics(UserId::new(1), &table);
        assert_eq!(
            report
                .product_highest_revenue_for_current_user
                .expect("winner exists")
                .product_name,
            "Alpha"
        );
        assert_eq!(
            report
                .product_highest_sales_number_for_current_user
                .expect("winner exists")
                .product_name,
            "Alpha"
        );
    }

    #[rstest]
    fn rankings_are_independent() {
        // Alpha wins revenue, Beta wins units.
        let table = vec![
            sale(1, 1, "Alpha", 1, 10.0),
            sale(2, 1, "Beta", 50, 1.0),
        ];
        let report = compile_statistics(UserId::new(1), &table);
        assert_eq!(
            report
                .product_highest_revenue_for_current_user
                .expect("winner exists")
                .product_name,
            "Alpha"
        );
        assert_eq!(
            report
                .product_highest_sales_number_for_current_user
                .expect("winner exists")
                .product_name,
            "Beta"
        );
    }

    #[rstest]
    fn caller_without_sales_reports_nulls_for_own_metrics() {
        let table = vec![sale(1, 2, "Product1", 10, 5.0)];
        let report = compile_statistics(UserId::new(1), &table);

        assert_eq!(report.average_sales_for_current_user, None);
        assert_eq!(report.highest_revenue_sale_for_current_user, None);
        assert_eq!(report.product_highest_revenue_for_current_user, None);
        assert_eq!(report.product_highest_sales_number_for_current_user, None);
        // The table-wide average is still defined.
        assert!(report.average_sale_all_user.is_some());
    }

    #[rstest]
    fn empty_table_reports_all_nulls() {
        let report = compile_statistics(UserId::new(1), &[]);
        let value = serde_json::to_value(&report).expect("report serializes");
        assert_eq!(
            value,
            json!({
                "average_sales_for_current_user": null,
                "average_sale_all_user": null,
                "highest_revenue_sale_for_current_user": null,
                "product_highest_revenue_for_current_user": null,
                "product_highest_sales_number_for_current_user": null,
            })
        );
    }

    #[rstest]
    fn zero_units_make_the_average_undefined() {
        // Revenue exists but no units were sold; the ratio has no value.
        let table = vec![sale(1, 1, "Product1", 0, 9.9)];
        let report = compile_statistics(UserId::new(1), &table);
        assert_eq!(report.average_sales_for_current_user, None);
        assert_eq!(report.average_sale_all_user, None);
        // The winner fields are still defined: the caller does have sales.
        assert!(report.highest_revenue_sale_for_current_user.is_some());
    }

    #[rstest]
    fn report_serializes_with_wire_shape() {
        let table = fixture_table();
        let report = compile_statistics(UserId::new(1), &table);
        let value = serde_json::to_value(&report).expect("report serializes");
        assert_eq!(
            value.get("highest_revenue_sale_for_current_user"),
            Some(&json!({ "sale_id": 1, "revenue": 2.3 }))
        );
        assert_eq!(
            value.get("product_highest_revenue_for_current_user"),
            Some(&json!({ "product_name": "Product1" }))
        );
    }
}
