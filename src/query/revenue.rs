use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::data::LineItem;
use crate::error::{QueryError, Result};
use crate::query::{NationScope, PartyNationIndex, QualifyingOrders};

/// Line items per partition when the scan is split across threads.
pub const MIN_PARTITION_SIZE: usize = 64 * 1024;

/// Nation name -> accumulated `extendedprice * (1 - discount)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevenueByNation {
    totals: BTreeMap<String, f64>,
}

impl RevenueByNation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds to the nation's running total, starting it at zero.
    pub fn add(&mut self, nation: &str, revenue: f64) {
        match self.totals.get_mut(nation) {
            Some(total) => *total += revenue,
            None => {
                self.totals.insert(nation.to_string(), 0.0 + revenue);
            }
        }
    }

    /// Folds another partial result into this one.
    pub fn merge(&mut self, other: RevenueByNation) {
        for (nation, revenue) in other.totals {
            *self.totals.entry(nation).or_insert(0.0) += revenue;
        }
    }

    pub fn get(&self, nation: &str) -> Option<f64> {
        self.totals.get(nation).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(nation, revenue)| (nation.as_str(), *revenue))
    }
}

impl FromIterator<(String, f64)> for RevenueByNation {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut revenue = RevenueByNation::new();
        for (nation, value) in iter {
            revenue.add(&nation, value);
        }
        revenue
    }
}

// NaN and infinities parse as f64 but are not prices or discounts.
fn parse_numeric(column: &'static str, value: &str, item: &LineItem) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(QueryError::MalformedNumericField {
            column,
            value: value.to_string(),
            orderkey: item.orderkey.clone(),
        }),
    }
}

/// Joins line items against the qualifying orders and the supplier index and
/// sums discounted prices of same-nation trades.
pub struct RevenueAggregator<'a> {
    scope: &'a NationScope,
    index: &'a PartyNationIndex,
    orders: &'a QualifyingOrders,
}

impl<'a> RevenueAggregator<'a> {
    pub fn new(
        scope: &'a NationScope,
        index: &'a PartyNationIndex,
        orders: &'a QualifyingOrders,
    ) -> Self {
        RevenueAggregator {
            scope,
            index,
            orders,
        }
    }

    /// Revenue of one line item, or `None` when it is not a same-nation
    /// trade inside the scope.
    pub fn line_revenue(&self, item: &LineItem) -> Result<Option<(&'a str, f64)>> {
        let order_nation = match self.orders.nation(&item.orderkey) {
            Some(nation) => nation,
            None => return Ok(None),
        };
        let supplier_nation = match self.index.supplier_nation(&item.suppkey) {
            Some(nation) => nation,
            None => return Ok(None),
        };
        if order_nation != supplier_nation {
            return Ok(None);
        }
        let nation_name = match self.scope.name(supplier_nation) {
            Some(name) => name,
            None => return Ok(None),
        };
        let extended_price = parse_numeric("l_extendedprice", &item.extendedprice, item)?;
        let discount = parse_numeric("l_discount", &item.discount, item)?;
        Ok(Some((nation_name, extended_price * (1.0 - discount))))
    }

    pub fn aggregate(&self, lineitems: &[LineItem]) -> Result<RevenueByNation> {
        let mut result = RevenueByNation::new();
        for item in lineitems {
            if let Some((nation, revenue)) = self.line_revenue(item)? {
                result.add(nation, revenue);
            }
        }
        Ok(result)
    }

    /// Splits the scan into partitions of `MIN_PARTITION_SIZE` line items and
    /// merges their totals in partition order. Partitioning does not depend on
    /// `num_threads`, so every hint sums in the same order and gives the same
    /// result. The hint only bounds the rayon workers, which are further
    /// capped by the partition count and the machine's parallelism.
    pub fn aggregate_partitioned(
        &self,
        lineitems: &[LineItem],
        num_threads: usize,
    ) -> Result<RevenueByNation> {
        let num_partitions = lineitems.len().div_ceil(MIN_PARTITION_SIZE);
        let workers = num_threads
            .min(num_partitions)
            .min(rayon::current_num_threads());
        let partials = if workers <= 1 {
            lineitems
                .chunks(MIN_PARTITION_SIZE)
                .map(|partition| self.aggregate(partition))
                .collect::<Result<Vec<RevenueByNation>>>()?
        } else {
            log::debug!(
                "Aggregating {} line items in {} partitions on {} threads",
                lineitems.len(),
                num_partitions,
                workers
            );
            let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
            pool.install(|| {
                lineitems
                    .par_chunks(MIN_PARTITION_SIZE)
                    .map(|partition| self.aggregate(partition))
                    .collect::<Result<Vec<RevenueByNation>>>()
            })?
        };
        let mut result = RevenueByNation::new();
        for partial in partials {
            result.merge(partial);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Customer, Nation, Order, Supplier};
    use crate::query::DateWindow;

    struct Fixture {
        scope: NationScope,
        index: PartyNationIndex,
        orders: QualifyingOrders,
    }

    // INDIA (8) and JAPAN (12) are in ASIA; GERMANY (7) is not.
    fn fixture() -> Fixture {
        let scope = NationScope::build(
            "2",
            &[
                Nation::new("8", "INDIA", "2"),
                Nation::new("12", "JAPAN", "2"),
                Nation::new("7", "GERMANY", "3"),
            ],
        );
        let index = PartyNationIndex::build(
            &scope,
            &[
                Supplier::new("1", "8"),
                Supplier::new("2", "12"),
                Supplier::new("3", "7"),
            ],
            &[
                Customer::new("10", "8"),
                Customer::new("11", "12"),
                Customer::new("12", "7"),
            ],
        );
        let orders = QualifyingOrders::build(
            &DateWindow::new("1994-01-01", "1995-01-01"),
            &[
                Order::new("100", "10", "1994-02-01"),
                Order::new("101", "11", "1994-03-01"),
                Order::new("102", "12", "1994-04-01"),
                Order::new("103", "10", "1996-01-01"),
            ],
            &index,
        );
        Fixture {
            scope,
            index,
            orders,
        }
    }

    fn assert_close(left: f64, right: f64) {
        assert!((left - right).abs() < 1e-6, "{} != {}", left, right);
    }

    #[test]
    fn sums_same_nation_trades() {
        let f = fixture();
        let aggregator = RevenueAggregator::new(&f.scope, &f.index, &f.orders);
        let items = vec![
            LineItem::new("100", "1", "1000.00", "0.10"),
            LineItem::new("100", "1", "200.00", "0.00"),
            LineItem::new("101", "2", "50.00", "0.50"),
        ];
        let result = aggregator.aggregate(&items).unwrap();
        assert_eq!(result.len(), 2);
        assert_close(result.get("INDIA").unwrap(), 1100.0);
        assert_close(result.get("JAPAN").unwrap(), 25.0);
    }

    #[test]
    fn cross_nation_trade_contributes_nothing() {
        let f = fixture();
        let aggregator = RevenueAggregator::new(&f.scope, &f.index, &f.orders);
        let base = vec![LineItem::new("100", "1", "1000.00", "0.10")];
        let mut with_cross = base.clone();
        // INDIA customer, JAPAN supplier.
        with_cross.push(LineItem::new("100", "2", "5000.00", "0.00"));

        let expected = aggregator.aggregate(&base).unwrap();
        let result = aggregator.aggregate(&with_cross).unwrap();
        assert_eq!(result, expected);
        assert_eq!(result.get("JAPAN"), None);
    }

    #[test]
    fn skips_unknown_orders_and_foreign_suppliers() {
        let f = fixture();
        let aggregator = RevenueAggregator::new(&f.scope, &f.index, &f.orders);
        let items = vec![
            LineItem::new("102", "3", "1000.00", "0.00"),
            LineItem::new("103", "1", "1000.00", "0.00"),
            LineItem::new("999", "1", "1000.00", "0.00"),
            LineItem::new("100", "3", "1000.00", "0.00"),
        ];
        assert!(aggregator.aggregate(&items).unwrap().is_empty());
    }

    #[test]
    fn malformed_price_aborts() {
        let f = fixture();
        let aggregator = RevenueAggregator::new(&f.scope, &f.index, &f.orders);
        let items = vec![
            LineItem::new("100", "1", "1000.00", "0.10"),
            LineItem::new("100", "1", "12,50", "0.10"),
        ];
        match aggregator.aggregate(&items) {
            Err(QueryError::MalformedNumericField {
                column,
                value,
                orderkey,
            }) => {
                assert_eq!(column, "l_extendedprice");
                assert_eq!(value, "12,50");
                assert_eq!(orderkey, "100");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn malformed_discount_aborts() {
        let f = fixture();
        let aggregator = RevenueAggregator::new(&f.scope, &f.index, &f.orders);
        let items = vec![LineItem::new("101", "2", "10.00", "")];
        assert!(matches!(
            aggregator.aggregate(&items),
            Err(QueryError::MalformedNumericField {
                column: "l_discount",
                ..
            })
        ));
    }

    #[test]
    fn discount_outside_unit_range_is_not_validated() {
        let f = fixture();
        let aggregator = RevenueAggregator::new(&f.scope, &f.index, &f.orders);
        let items = vec![LineItem::new("100", "1", "100.00", "1.50")];
        let result = aggregator.aggregate(&items).unwrap();
        assert_close(result.get("INDIA").unwrap(), -50.0);
    }

    fn partitioned_items() -> Vec<LineItem> {
        (0..3 * MIN_PARTITION_SIZE + 17)
            .map(|i| match i % 4 {
                0 => LineItem::new("100", "1", "10.25", "0.04"),
                1 => LineItem::new("101", "2", "3.50", "0.10"),
                2 => LineItem::new("100", "2", "99.00", "0.00"),
                _ => LineItem::new("102", "3", "7.00", "0.00"),
            })
            .collect()
    }

    #[test]
    fn partitioned_scan_matches_sequential() {
        let f = fixture();
        let aggregator = RevenueAggregator::new(&f.scope, &f.index, &f.orders);
        let items = partitioned_items();

        let sequential = aggregator.aggregate(&items).unwrap();
        let partitioned = aggregator.aggregate_partitioned(&items, 4).unwrap();
        assert_eq!(sequential.len(), partitioned.len());
        for (nation, revenue) in sequential.iter() {
            let other = partitioned.get(nation).unwrap();
            assert!((revenue - other).abs() <= 1e-9 * revenue.abs());
        }
        assert_eq!(partitioned, aggregator.aggregate_partitioned(&items, 4).unwrap());
    }

    #[test]
    fn thread_hint_does_not_change_totals() {
        let f = fixture();
        let aggregator = RevenueAggregator::new(&f.scope, &f.index, &f.orders);
        let items = partitioned_items();
        let expected = aggregator.aggregate_partitioned(&items, 1).unwrap();
        for num_threads in [0, 2, 3, 4, 100_000, usize::MAX] {
            assert_eq!(
                aggregator.aggregate_partitioned(&items, num_threads).unwrap(),
                expected,
                "num_threads = {}",
                num_threads
            );
        }
    }

    #[test]
    fn huge_thread_hint_on_small_input() {
        let f = fixture();
        let aggregator = RevenueAggregator::new(&f.scope, &f.index, &f.orders);
        let items = vec![LineItem::new("100", "1", "1000.00", "0.10")];
        let expected = aggregator.aggregate(&items).unwrap();
        assert_eq!(aggregator.aggregate_partitioned(&items, usize::MAX).unwrap(), expected);
        assert!(aggregator.aggregate_partitioned(&[], usize::MAX).unwrap().is_empty());
    }

    #[test]
    fn non_finite_numbers_are_malformed() {
        let f = fixture();
        let aggregator = RevenueAggregator::new(&f.scope, &f.index, &f.orders);
        for (price, discount, column) in [
            ("NaN", "0.10", "l_extendedprice"),
            ("inf", "0.10", "l_extendedprice"),
            ("100.00", "-infinity", "l_discount"),
        ] {
            let items = vec![LineItem::new("100", "1", price, discount)];
            match aggregator.aggregate(&items) {
                Err(QueryError::MalformedNumericField { column: found, .. }) => {
                    assert_eq!(found, column)
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn merge_adds_partials() {
        let mut left = vec![("INDIA".to_string(), 1.5)]
            .into_iter()
            .collect::<RevenueByNation>();
        let right = vec![("INDIA".to_string(), 2.0), ("JAPAN".to_string(), 4.0)]
            .into_iter()
            .collect::<RevenueByNation>();
        left.merge(right);
        assert_eq!(left.get("INDIA"), Some(3.5));
        assert_eq!(left.get("JAPAN"), Some(4.0));
    }
}
