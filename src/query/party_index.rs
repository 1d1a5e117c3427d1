use rustc_hash::FxHashMap;

use crate::data::{Customer, Key, Supplier};
use crate::query::NationScope;

/// Supplier -> nation and customer -> nation for parties inside the scope.
/// Parties of other regions are absent rather than mapped.
#[derive(Debug, Clone, Default)]
pub struct PartyNationIndex {
    supplier_nation: FxHashMap<Key, Key>,
    customer_nation: FxHashMap<Key, Key>,
}

impl PartyNationIndex {
    pub fn build(scope: &NationScope, suppliers: &[Supplier], customers: &[Customer]) -> Self {
        let supplier_nation = suppliers
            .iter()
            .filter(|supplier| scope.contains(&supplier.nationkey))
            .map(|supplier| (supplier.suppkey.clone(), supplier.nationkey.clone()))
            .collect();
        let customer_nation = customers
            .iter()
            .filter(|customer| scope.contains(&customer.nationkey))
            .map(|customer| (customer.custkey.clone(), customer.nationkey.clone()))
            .collect();
        PartyNationIndex {
            supplier_nation,
            customer_nation,
        }
    }

    pub fn supplier_nation(&self, suppkey: &str) -> Option<&str> {
        self.supplier_nation.get(suppkey).map(|x| x.as_str())
    }

    pub fn customer_nation(&self, custkey: &str) -> Option<&str> {
        self.customer_nation.get(custkey).map(|x| x.as_str())
    }

    pub fn num_suppliers(&self) -> usize {
        self.supplier_nation.len()
    }

    pub fn num_customers(&self) -> usize {
        self.customer_nation.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Nation;

    fn asia() -> NationScope {
        NationScope::build(
            "2",
            &[
                Nation::new("8", "INDIA", "2"),
                Nation::new("12", "JAPAN", "2"),
                Nation::new("7", "GERMANY", "3"),
            ],
        )
    }

    #[test]
    fn indexes_only_in_scope_parties() {
        let suppliers = vec![
            Supplier::new("1", "8"),
            Supplier::new("2", "7"),
            Supplier::new("3", "12"),
        ];
        let customers = vec![Customer::new("10", "7"), Customer::new("11", "12")];
        let index = PartyNationIndex::build(&asia(), &suppliers, &customers);

        assert_eq!(index.num_suppliers(), 2);
        assert_eq!(index.supplier_nation("1"), Some("8"));
        assert_eq!(index.supplier_nation("3"), Some("12"));
        assert_eq!(index.supplier_nation("2"), None);

        assert_eq!(index.num_customers(), 1);
        assert_eq!(index.customer_nation("11"), Some("12"));
        assert_eq!(index.customer_nation("10"), None);
    }

    #[test]
    fn unknown_keys_are_absent() {
        let index = PartyNationIndex::build(&asia(), &[], &[]);
        assert_eq!(index.supplier_nation("1"), None);
        assert_eq!(index.customer_nation("1"), None);
    }

    #[test]
    fn supplier_and_customer_keys_do_not_collide() {
        let index = PartyNationIndex::build(
            &asia(),
            &[Supplier::new("5", "8")],
            &[Customer::new("5", "12")],
        );
        assert_eq!(index.supplier_nation("5"), Some("8"));
        assert_eq!(index.customer_nation("5"), Some("12"));
    }
}
