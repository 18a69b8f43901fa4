//! Reporting currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount in Buildledger is a `rust_decimal::Decimal`; this module only
//! names the currency those decimals are expressed in.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    #[default]
    Usd,
    /// Canadian Dollar
    Cad,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Japanese Yen
    Jpy,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Cad => write!(f, "CAD"),
            Self::Eur => write!(f, "EUR"),
            Self::Gbp => write!(f, "GBP"),
            Self::Jpy => write!(f, "JPY"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "CAD" => Ok(Self::Cad),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "JPY" => Ok(Self::Jpy),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Cad.to_string(), "CAD");
        assert_eq!(Currency::Eur.to_string(), "EUR");
        assert_eq!(Currency::Gbp.to_string(), "GBP");
        assert_eq!(Currency::Jpy.to_string(), "JPY");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("cad").unwrap(), Currency::Cad);
        assert!(Currency::from_str("XXX").is_err());
        assert!(Currency::from_str("").is_err());
    }

    #[test]
    fn test_default_is_usd() {
        assert_eq!(Currency::default(), Currency::Usd);
    }
}
