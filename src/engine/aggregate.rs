//! Cost aggregation
//!
//! Reduces a list of cost records into the monthly totals every other
//! calculation starts from.

use serde::{Deserialize, Serialize};

use crate::models::{CostGroup, CostKind, CostRecord, Money};

/// Monthly totals over a set of cost records
///
/// Only active records contribute to amounts. Every active record is exactly
/// one kind and one group, so `total_active` equals both
/// `total_fixed + total_variable` and the sum of the two group totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_active: Money,
    pub total_fixed: Money,
    pub total_variable: Money,
    pub total_cost_of_goods: Money,
    pub total_operational: Money,
    pub active_count: usize,
    pub inactive_count: usize,
    pub active_cost_of_goods_count: usize,
    pub active_operational_count: usize,
}

impl CostSummary {
    /// Active total for one group
    pub fn total_by_group(&self, group: CostGroup) -> Money {
        match group {
            CostGroup::CostOfGoods => self.total_cost_of_goods,
            CostGroup::Operational => self.total_operational,
        }
    }

    /// Active record count for one group
    pub fn active_count_by_group(&self, group: CostGroup) -> usize {
        match group {
            CostGroup::CostOfGoods => self.active_cost_of_goods_count,
            CostGroup::Operational => self.active_operational_count,
        }
    }

    /// Active total for one group, or for everything when `group` is `None`
    pub fn pool(&self, group: Option<CostGroup>) -> Money {
        group.map_or(self.total_active, |g| self.total_by_group(g))
    }

    /// True when no record was seen at all
    pub fn is_empty(&self) -> bool {
        self.active_count == 0 && self.inactive_count == 0
    }
}

/// Summarize cost records
///
/// Amounts are summed as stored. Negative amounts cannot be created through
/// the cost form, but if one reaches this function it is not clamped.
pub fn aggregate<'a, I>(records: I) -> CostSummary
where
    I: IntoIterator<Item = &'a CostRecord>,
{
    let mut summary = CostSummary::default();

    for record in records {
        if !record.is_active() {
            summary.inactive_count += 1;
            continue;
        }

        let amount = record.monthly_amount;
        summary.active_count += 1;
        summary.total_active += amount;

        match record.kind {
            CostKind::Fixed => summary.total_fixed += amount,
            CostKind::Variable => summary.total_variable += amount,
        }

        match record.group {
            CostGroup::CostOfGoods => {
                summary.total_cost_of_goods += amount;
                summary.active_cost_of_goods_count += 1;
            }
            CostGroup::Operational => {
                summary.total_operational += amount;
                summary.active_operational_count += 1;
            }
        }
    }

    summary
}
