use derive_more::{Add, AddAssign, Sum};
use serde::{Deserialize, Serialize};

pub type ResourceUnits = u32;
pub type ResourceFractions = u32;

pub const FRACTIONS_PER_UNIT: ResourceFractions = 10_000;
pub const FRACTIONS_MAX_DIGITS: usize = 4; // = log10(FRACTIONS_PER_UNIT)

/// Decimal quantity of a resource with a fixed precision of [`FRACTIONS_MAX_DIGITS`] digits.
#[derive(
    Debug,
    Default,
    Serialize,
    Clone,
    Copy,
    Hash,
    Eq,
    Deserialize,
    PartialEq,
    Ord,
    PartialOrd,
    AddAssign,
    Add,
    Sum,
)]
pub struct ResourceAmount(u64);

impl ResourceAmount {
    pub const ZERO: ResourceAmount = ResourceAmount(0);
    pub const ONE: ResourceAmount = ResourceAmount(FRACTIONS_PER_UNIT as u64);
    /// Used by profiles that match any requirement.
    pub const MAX: ResourceAmount = ResourceAmount(u64::MAX);

    pub fn new(units: ResourceUnits, fractions: ResourceFractions) -> Self {
        assert!(fractions < FRACTIONS_PER_UNIT);
        ResourceAmount(units as u64 * FRACTIONS_PER_UNIT as u64 + fractions as u64)
    }

    pub const fn new_units(units: ResourceUnits) -> Self {
        ResourceAmount(units as u64 * FRACTIONS_PER_UNIT as u64)
    }

    pub fn new_fractions(fractions: ResourceFractions) -> Self {
        assert!(fractions < FRACTIONS_PER_UNIT);
        ResourceAmount(fractions as u64)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn units(&self) -> u64 {
        self.0 / (FRACTIONS_PER_UNIT as u64)
    }

    pub fn fractions(&self) -> ResourceFractions {
        (self.0 % (FRACTIONS_PER_UNIT as u64)) as ResourceFractions
    }

    pub fn total_fractions(&self) -> u64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / FRACTIONS_PER_UNIT as f64
    }

    pub fn saturating_add(self, other: ResourceAmount) -> ResourceAmount {
        ResourceAmount(self.0.saturating_add(other.0))
    }

    /// Returns `None` when `other` is larger than `self`.
    pub fn checked_sub(self, other: ResourceAmount) -> Option<ResourceAmount> {
        self.0.checked_sub(other.0).map(ResourceAmount)
    }
}

impl From<ResourceUnits> for ResourceAmount {
    fn from(units: ResourceUnits) -> Self {
        ResourceAmount::new_units(units)
    }
}

impl std::str::FromStr for ResourceAmount {
    type Err = String;

    /// Parses a decimal number such as `4`, `0.5` or `1.2500`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (units, fractions) = match s.split_once('.') {
            Some((units, fractions)) => (units, fractions),
            None => (s, ""),
        };
        if fractions.len() > FRACTIONS_MAX_DIGITS {
            return Err(format!(
                "Resource amount '{s}' has more than {FRACTIONS_MAX_DIGITS} fractional digits"
            ));
        }
        let units: u64 = units
            .parse()
            .map_err(|_| format!("Invalid resource amount '{s}'"))?;
        let fractions: u64 = if fractions.is_empty() {
            0
        } else {
            let padded = format!("{fractions:0<width$}", width = FRACTIONS_MAX_DIGITS);
            padded
                .parse()
                .map_err(|_| format!("Invalid resource amount '{s}'"))?
        };
        units
            .checked_mul(FRACTIONS_PER_UNIT as u64)
            .and_then(|v| v.checked_add(fractions))
            .map(ResourceAmount)
            .ok_or_else(|| format!("Resource amount '{s}' is too large"))
    }
}

impl std::fmt::Display for ResourceAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if *self == ResourceAmount::MAX {
            return write!(f, "max");
        }
        let fractions = self.fractions();
        write!(f, "{}", self.units())?;
        if fractions != 0 {
            let num = format!("{:01$}", fractions, FRACTIONS_MAX_DIGITS);
            write!(f, ".{}", num.trim_end_matches("0"))?;
        }
        Ok(())
    }
}
