use itertools::Itertools;

use crate::query::RevenueByNation;

/// Orders nations by revenue, highest first. Equal revenues fall back to the
/// nation name, ascending, so the ranking is deterministic.
pub fn rank(revenue: &RevenueByNation) -> Vec<(String, f64)> {
    revenue
        .iter()
        .sorted_by(|(left_name, left), (right_name, right)| {
            right.total_cmp(left).then_with(|| left_name.cmp(right_name))
        })
        .map(|(nation, revenue)| (nation.to_string(), revenue))
        .collect()
}
