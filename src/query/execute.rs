use std::time::Instant;

use crate::data::TpchTables;
use crate::error::Result;
use crate::query::*;

// select
// 	n_name,
// 	sum(l_extendedprice * (1 - l_discount)) as revenue
// from
// 	customer,
// 	orders,
// 	lineitem,
// 	supplier,
// 	nation,
// 	region
// where
// 	c_custkey = o_custkey
// 	and l_orderkey = o_orderkey
// 	and l_suppkey = s_suppkey
// 	and c_nationkey = s_nationkey
// 	and s_nationkey = n_nationkey
// 	and n_regionkey = r_regionkey
// 	and r_name = :r_name
// 	and o_orderdate >= date :start_date
// 	and o_orderdate < date :end_date
// group by
// 	n_name
// order by
// 	revenue desc;

/// Runs the local supplier volume query over fully loaded tables. Any
/// failure aborts the whole run; no partial totals are returned.
pub fn execute_query5(params: &QueryParams, tables: &TpchTables) -> Result<RevenueByNation> {
    let start_time = Instant::now();

    let regionkey = resolve_region(params.r_name(), &tables.region)?;
    let scope = NationScope::build(regionkey, &tables.nation);
    log::info!(
        "Region {} ({}) has {} nations",
        params.r_name(),
        regionkey,
        scope.len()
    );

    let index = PartyNationIndex::build(&scope, &tables.supplier, &tables.customer);
    log::info!(
        "Indexed {} suppliers and {} customers in region",
        index.num_suppliers(),
        index.num_customers()
    );

    let window = DateWindow::new(params.start_date(), params.end_date());
    let orders = QualifyingOrders::build(&window, &tables.orders, &index);
    log::info!("Valid orders: {}", orders.len());

    let aggregator = RevenueAggregator::new(&scope, &index, &orders);
    let result = aggregator.aggregate_partitioned(&tables.lineitem, *params.num_threads())?;

    log::info!(
        "Query execution completed. Found {} nations in {:.2?}",
        result.len(),
        Instant::now() - start_time
    );
    Ok(result)
}
