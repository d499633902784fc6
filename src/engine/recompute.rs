//! Reactive recomputation
//!
//! The engine itself is stateless. Callers that react to input changes (the
//! `watch` command) push each new input snapshot through a [`Debouncer`] and
//! run [`recompute`] only once edits have settled.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::aggregate::{aggregate, CostSummary};
use super::allocation::{allocate_configured, OverheadResult};
use super::hpp::{compose_hpp, HppResult};
use crate::error::CostResult;
use crate::models::{AllocationConfig, CostGroup, CostRecord, PricingRule};

/// Holds the latest pushed value until `delay` passes without a newer push
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value and restart the delay
    pub fn push(&mut self, value: T, now: Instant) {
        if self.pending.is_some() {
            tracing::debug!("discarding pending recomputation in favor of newer input");
        }
        self.pending = Some((value, now));
    }

    /// Take the pending value if it has been quiet for the full delay
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, pushed_at)) if now.saturating_duration_since(*pushed_at) >= self.delay => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Labor and pricing for an optional HPP step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HppInputs {
    pub material_per_unit: f64,
    pub labor_per_unit: f64,
    pub pricing: PricingRule,
}

/// One consistent snapshot of everything a recomputation reads
#[derive(Debug, Clone, Default)]
pub struct RecomputeInputs {
    pub records: Vec<CostRecord>,
    pub config: Option<AllocationConfig>,
    pub group: Option<CostGroup>,
    pub hpp: Option<HppInputs>,
}

/// Output of one recomputation
#[derive(Debug, Clone, Serialize)]
pub struct RecomputeOutcome {
    pub summary: CostSummary,
    pub overhead: OverheadResult,
    pub hpp: Option<HppResult>,
}

/// Aggregate, allocate and optionally price from one input snapshot
///
/// Fails with `ConfigurationMissing` when no allocation settings exist.
pub fn recompute(inputs: &RecomputeInputs) -> CostResult<RecomputeOutcome> {
    let summary = aggregate(&inputs.records);
    let material = inputs.hpp.map(|h| h.material_per_unit);
    let overhead = allocate_configured(
        summary.pool(inputs.group),
        inputs.config.as_ref(),
        material,
    )?;

    let hpp = match inputs.hpp {
        Some(h) => Some(compose_hpp(
            h.material_per_unit,
            h.labor_per_unit,
            overhead.overhead_per_unit,
            &h.pricing,
        )?),
        None => None,
    };

    tracing::debug!(
        records = inputs.records.len(),
        pool = %overhead.total_cost,
        overhead_per_unit = overhead.overhead_per_unit,
        "recomputed overhead"
    );

    Ok(RecomputeOutcome {
        summary,
        overhead,
        hpp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostKind, Money};

    #[test]
    fn test_debouncer_waits_for_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.push(1, start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(100)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), Some(1));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn test_debouncer_last_write_wins() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.push("first", start);
        debouncer.push("second", start + Duration::from_millis(200));

        // The first push's deadline has passed but the newer push restarted it.
        assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)),
            Some("second")
        );
    }

    #[test]
    fn test_debouncer_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push(7, start);
        assert_eq!(debouncer.cancel(), Some(7));
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }

    fn bakery_records() -> Vec<CostRecord> {
        vec![
            CostRecord::new(
                "Gas Oven",
                Money::from_units(690_000),
                CostKind::Fixed,
                CostGroup::CostOfGoods,
            ),
            CostRecord::new(
                "Sewa Dapur",
                Money::from_units(1_500_000),
                CostKind::Fixed,
                CostGroup::CostOfGoods,
            ),
            CostRecord::new(
                "Marketing",
                Money::from_units(4_000_000),
                CostKind::Variable,
                CostGroup::Operational,
            ),
        ]
    }

    #[test]
    fn test_recompute_with_hpp() {
        crate::logging::init_test();
        let inputs = RecomputeInputs {
            records: bakery_records(),
            config: Some(AllocationConfig::per_unit(3000.0)),
            group: Some(CostGroup::CostOfGoods),
            hpp: Some(HppInputs {
                material_per_unit: 4200.0,
                labor_per_unit: 3000.0,
                pricing: PricingRule::markup(35.0),
            }),
        };

        let outcome = recompute(&inputs).unwrap();
        assert_eq!(outcome.summary.total_active.units(), 6_190_000);
        assert_eq!(outcome.overhead.rounded().units(), 730);

        let hpp = outcome.hpp.unwrap().rounded();
        assert_eq!(hpp.hpp_per_unit.units(), 7930);
        assert_eq!(hpp.selling_price.units(), 10_706);
    }

    #[test]
    fn test_recompute_without_config() {
        let inputs = RecomputeInputs {
            records: bakery_records(),
            ..Default::default()
        };
        assert!(recompute(&inputs).unwrap_err().is_configuration_missing());
    }
}
