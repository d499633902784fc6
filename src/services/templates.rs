//! Quick-setup cost templates per business type

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{CostError, CostResult};
use crate::models::CostGroup::{self, CostOfGoods, Operational};
use crate::models::CostKind::{self, Fixed, Variable};
use crate::models::{CostRecord, Money};
use crate::services::cost::{CostService, NewCost};

/// Business types with a starter cost list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessType {
    Bakery,
    Restaurant,
    OnlineShop,
    General,
}

impl BusinessType {
    pub fn all() -> &'static [Self] {
        &[Self::Bakery, Self::Restaurant, Self::OnlineShop, Self::General]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Bakery => "bakery",
            Self::Restaurant => "restaurant",
            Self::OnlineShop => "online-shop",
            Self::General => "general",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Bakery => "Bakery and pastry",
            Self::Restaurant => "Food stall or restaurant",
            Self::OnlineShop => "E-commerce and marketplace seller",
            Self::General => "Any other small business",
        }
    }

    /// Rough monthly total of the template, shown before applying it
    pub fn estimated_monthly_total(&self) -> Money {
        Money::from_units(match self {
            Self::Bakery => 4_200_000,
            Self::Restaurant => 8_500_000,
            Self::OnlineShop => 3_800_000,
            Self::General => 4_000_000,
        })
    }

    pub fn templates(&self) -> &'static [CostTemplate] {
        match self {
            Self::Bakery => BAKERY,
            Self::Restaurant => RESTAURANT,
            Self::OnlineShop => ONLINE_SHOP,
            Self::General => GENERAL,
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for BusinessType {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|b| b.key() == normalized)
            .ok_or_else(|| {
                CostError::Validation(format!(
                    "Unknown business type '{}'. Expected one of: bakery, restaurant, online-shop, general",
                    s
                ))
            })
    }
}

/// One starter cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostTemplate {
    pub name: &'static str,
    pub monthly_amount: i64,
    pub kind: CostKind,
    pub group: CostGroup,
}

impl CostTemplate {
    const fn new(
        name: &'static str,
        monthly_amount: i64,
        kind: CostKind,
        group: CostGroup,
    ) -> Self {
        Self {
            name,
            monthly_amount,
            kind,
            group,
        }
    }

    pub fn to_new_cost(&self) -> NewCost {
        NewCost::new(
            self.name,
            Money::from_units(self.monthly_amount),
            self.kind,
            self.group,
        )
    }
}

const BAKERY: &[CostTemplate] = &[
    CostTemplate::new("Gas Oven", 500_000, Fixed, CostOfGoods),
    CostTemplate::new("Listrik Oven", 300_000, Fixed, CostOfGoods),
    CostTemplate::new("Sewa Dapur", 1_000_000, Fixed, CostOfGoods),
    CostTemplate::new("Marketing", 1_000_000, Variable, Operational),
    CostTemplate::new("Admin/Kasir", 1_400_000, Fixed, Operational),
];

const RESTAURANT: &[CostTemplate] = &[
    CostTemplate::new("Gas Kompor", 400_000, Fixed, CostOfGoods),
    CostTemplate::new("Sewa Dapur", 1_500_000, Fixed, CostOfGoods),
    CostTemplate::new("Gaji Koki", 3_000_000, Fixed, CostOfGoods),
    CostTemplate::new("Marketing", 3_000_000, Variable, Operational),
    CostTemplate::new("Internet dan Listrik Toko", 600_000, Fixed, Operational),
];

const ONLINE_SHOP: &[CostTemplate] = &[
    CostTemplate::new("Packaging", 800_000, Variable, CostOfGoods),
    CostTemplate::new("Fee Marketplace", 1_000_000, Variable, Operational),
    CostTemplate::new("Iklan Online", 1_200_000, Variable, Operational),
    CostTemplate::new("Internet", 300_000, Fixed, Operational),
    CostTemplate::new("Admin Online", 500_000, Fixed, Operational),
];

const GENERAL: &[CostTemplate] = &[
    CostTemplate::new("Sewa Tempat", 1_500_000, Fixed, Operational),
    CostTemplate::new("Listrik Produksi", 500_000, Fixed, CostOfGoods),
    CostTemplate::new("Gaji Karyawan", 1_500_000, Fixed, Operational),
    CostTemplate::new("Marketing", 500_000, Variable, Operational),
];

/// Result of applying a template
#[derive(Debug, Clone, Default)]
pub struct TemplateOutcome {
    pub created: Vec<CostRecord>,
    /// Template names that already existed
    pub skipped: Vec<String>,
}

/// Create the template's costs, skipping names that already exist
pub fn apply_template(
    service: &CostService<'_>,
    business: BusinessType,
) -> CostResult<TemplateOutcome> {
    let mut outcome = TemplateOutcome::default();

    for template in business.templates() {
        if service.find(template.name)?.is_some() {
            outcome.skipped.push(template.name.to_string());
            continue;
        }
        outcome.created.push(service.create(template.to_new_cost())?);
    }

    tracing::info!(
        business = %business,
        created = outcome.created.len(),
        skipped = outcome.skipped.len(),
        "applied cost template"
    );
    Ok(outcome)
}
