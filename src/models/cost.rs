//! Operational cost records
//!
//! A cost record is one recurring monthly expense of the business. Its kind,
//! status and group decide which totals and allocations it feeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CostId;
use super::money::Money;

/// Lowest monthly amount the cost form accepts
pub const MIN_MONTHLY_AMOUNT: i64 = 1_000;
/// Highest monthly amount the cost form accepts
pub const MAX_MONTHLY_AMOUNT: i64 = 10_000_000_000;
/// Below this a monthly amount is accepted but flagged
pub const RECOMMENDED_MIN_MONTHLY_AMOUNT: i64 = 50_000;
/// Above this a monthly amount is accepted but flagged
pub const RECOMMENDED_MAX_MONTHLY_AMOUNT: i64 = 100_000_000;

const NAME_MIN_LEN: usize = 3;
const NAME_MAX_LEN: usize = 100;
const FORBIDDEN_NAME_CHARS: &[char] = &['<', '>', '&', '"', '\'', '\\'];

/// Whether the amount varies with production volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostKind {
    Fixed,
    Variable,
}

impl fmt::Display for CostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "Fixed"),
            Self::Variable => write!(f, "Variable"),
        }
    }
}

/// Only active records participate in totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for CostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Which downstream calculation a record feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostGroup {
    /// Production overhead, folded into the cost of goods (HPP)
    CostOfGoods,
    /// Running the business: marketing, admin, marketplace fees
    Operational,
}

impl CostGroup {
    /// All groups in display order
    pub fn all() -> &'static [Self] {
        &[Self::CostOfGoods, Self::Operational]
    }

    /// Longer label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::CostOfGoods => "Production overhead (in HPP)",
            Self::Operational => "Operational (outside HPP)",
        }
    }
}

impl fmt::Display for CostGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CostOfGoods => write!(f, "Cost of goods"),
            Self::Operational => write!(f, "Operational"),
        }
    }
}

/// A recurring monthly cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    /// Unique identifier
    pub id: CostId,

    /// Free-text label
    pub name: String,

    /// Amount spent per month
    pub monthly_amount: Money,

    /// Fixed or variable
    pub kind: CostKind,

    /// Active or inactive
    #[serde(default)]
    pub status: CostStatus,

    /// Cost of goods or operational
    pub group: CostGroup,

    /// Optional notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl CostRecord {
    /// Create a new active cost record
    pub fn new(
        name: impl Into<String>,
        monthly_amount: Money,
        kind: CostKind,
        group: CostGroup,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: CostId::new(),
            name: name.into(),
            monthly_amount,
            kind,
            status: CostStatus::Active,
            group,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this record counts toward totals
    pub fn is_active(&self) -> bool {
        self.status == CostStatus::Active
    }

    /// Activate or deactivate the record
    pub fn set_status(&mut self, status: CostStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Validate the record against the cost form rules
    pub fn validate(&self) -> Result<(), CostValidationError> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(CostValidationError::EmptyName);
        }

        let len = trimmed.chars().count();
        if len < NAME_MIN_LEN {
            return Err(CostValidationError::NameTooShort(len));
        }
        if len > NAME_MAX_LEN {
            return Err(CostValidationError::NameTooLong(len));
        }

        if let Some(c) = self.name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
            return Err(CostValidationError::ForbiddenCharacter(c));
        }

        let amount = self.monthly_amount.units();
        if amount <= 0 {
            return Err(CostValidationError::NonPositiveAmount);
        }
        if amount < MIN_MONTHLY_AMOUNT {
            return Err(CostValidationError::AmountTooLow(amount));
        }
        if amount > MAX_MONTHLY_AMOUNT {
            return Err(CostValidationError::AmountTooHigh(amount));
        }

        Ok(())
    }

    /// Non-blocking hints about unusual values
    pub fn warnings(&self) -> Vec<String> {
        let amount = self.monthly_amount.units();
        let mut warnings = Vec::new();
        if amount > 0 && amount < RECOMMENDED_MIN_MONTHLY_AMOUNT {
            warnings.push(format!(
                "{} per month looks small for '{}'; double-check the amount",
                self.monthly_amount, self.name
            ));
        } else if amount > RECOMMENDED_MAX_MONTHLY_AMOUNT {
            warnings.push(format!(
                "{} per month is unusually large for '{}'; double-check the amount",
                self.monthly_amount, self.name
            ));
        }
        warnings
    }
}

impl fmt::Display for CostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for cost records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostValidationError {
    EmptyName,
    NameTooShort(usize),
    NameTooLong(usize),
    ForbiddenCharacter(char),
    NonPositiveAmount,
    AmountTooLow(i64),
    AmountTooHigh(i64),
}

impl fmt::Display for CostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Cost name cannot be empty"),
            Self::NameTooShort(len) => write!(
                f,
                "Cost name too short ({} chars, min {})",
                len, NAME_MIN_LEN
            ),
            Self::NameTooLong(len) => write!(
                f,
                "Cost name too long ({} chars, max {})",
                len, NAME_MAX_LEN
            ),
            Self::ForbiddenCharacter(c) => {
                write!(f, "Cost name contains a forbidden character: {}", c)
            }
            Self::NonPositiveAmount => write!(f, "Monthly amount must be greater than zero"),
            Self::AmountTooLow(amount) => write!(
                f,
                "Monthly amount {} is below the minimum of {}",
                Money::from_units(*amount),
                Money::from_units(MIN_MONTHLY_AMOUNT)
            ),
            Self::AmountTooHigh(amount) => write!(
                f,
                "Monthly amount {} is above the maximum of {}",
                Money::from_units(*amount),
                Money::from_units(MAX_MONTHLY_AMOUNT)
            ),
        }
    }
}

impl std::error::Error for CostValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn gas_oven() -> CostRecord {
        CostRecord::new(
            "Gas Oven",
            Money::from_units(690_000),
            CostKind::Fixed,
            CostGroup::CostOfGoods,
        )
    }

    #[test]
    fn test_new_record_is_active() {
        let cost = gas_oven();
        assert!(cost.is_active());
        assert_eq!(cost.status, CostStatus::Active);
        assert!(cost.description.is_none());
    }

    #[test]
    fn test_set_status() {
        let mut cost = gas_oven();
        cost.set_status(CostStatus::Inactive);
        assert!(!cost.is_active());
    }

    #[test]
    fn test_validation_names() {
        let mut cost = gas_oven();
        assert!(cost.validate().is_ok());

        cost.name = "  ".into();
        assert_eq!(cost.validate(), Err(CostValidationError::EmptyName));

        cost.name = "Ab".into();
        assert_eq!(cost.validate(), Err(CostValidationError::NameTooShort(2)));

        cost.name = "a".repeat(101);
        assert!(matches!(
            cost.validate(),
            Err(CostValidationError::NameTooLong(101))
        ));

        cost.name = "Gas <Oven>".into();
        assert_eq!(
            cost.validate(),
            Err(CostValidationError::ForbiddenCharacter('<'))
        );
    }

    #[test]
    fn test_validation_amounts() {
        let mut cost = gas_oven();

        cost.monthly_amount = Money::zero();
        assert_eq!(cost.validate(), Err(CostValidationError::NonPositiveAmount));

        cost.monthly_amount = Money::from_units(-1000);
        assert_eq!(cost.validate(), Err(CostValidationError::NonPositiveAmount));

        cost.monthly_amount = Money::from_units(500);
        assert_eq!(cost.validate(), Err(CostValidationError::AmountTooLow(500)));

        cost.monthly_amount = Money::from_units(MAX_MONTHLY_AMOUNT + 1);
        assert!(matches!(
            cost.validate(),
            Err(CostValidationError::AmountTooHigh(_))
        ));
    }

    #[test]
    fn test_warnings() {
        let mut cost = gas_oven();
        assert!(cost.warnings().is_empty());

        cost.monthly_amount = Money::from_units(20_000);
        assert_eq!(cost.warnings().len(), 1);

        cost.monthly_amount = Money::from_units(200_000_000);
        assert_eq!(cost.warnings().len(), 1);
    }

    #[test]
    fn test_error_message_uses_currency() {
        let err = CostValidationError::AmountTooLow(500);
        assert!(err.to_string().contains("Rp 1.000"));
    }

    #[test]
    fn test_serialization() {
        let cost = gas_oven();
        let json = serde_json::to_string(&cost).unwrap();
        assert!(json.contains("\"group\":\"cost_of_goods\""));
        assert!(json.contains("\"kind\":\"fixed\""));

        let deserialized: CostRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(cost, deserialized);
    }
}
