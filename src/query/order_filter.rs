use rustc_hash::FxHashMap;

use crate::data::{Key, Order};
use crate::query::PartyNationIndex;

/// Half-open window `[start_date, end_date)` over canonical `YYYY-MM-DD` text.
#[derive(Debug, Clone, PartialEq)]
pub struct DateWindow<'a> {
    start_date: &'a str,
    end_date: &'a str,
}

impl<'a> DateWindow<'a> {
    pub fn new(start_date: &'a str, end_date: &'a str) -> Self {
        DateWindow {
            start_date,
            end_date,
        }
    }

    pub fn contains(&self, date: &str) -> bool {
        date >= self.start_date && date < self.end_date
    }
}

/// Orders inside the window placed by an in-scope customer, keyed by order
/// and carrying the customer's nation.
#[derive(Debug, Clone, Default)]
pub struct QualifyingOrders {
    order_nation: FxHashMap<Key, Key>,
}

impl QualifyingOrders {
    pub fn build(window: &DateWindow, orders: &[Order], index: &PartyNationIndex) -> Self {
        let mut order_nation = FxHashMap::default();
        for order in orders {
            if !window.contains(&order.orderdate) {
                continue;
            }
            if let Some(nationkey) = index.customer_nation(&order.custkey) {
                order_nation.insert(order.orderkey.clone(), nationkey.to_string());
            }
        }
        QualifyingOrders { order_nation }
    }

    pub fn nation(&self, orderkey: &str) -> Option<&str> {
        self.order_nation.get(orderkey).map(|x| x.as_str())
    }

    pub fn len(&self) -> usize {
        self.order_nation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order_nation.is_empty()
    }
}
