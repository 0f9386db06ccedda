//! Exact-precision amounts, gas prices and gas policy.

use crate::error::{Error, Result};
use cosmos_sdk_proto::cosmos::base::v1beta1::Coin as ProtoCoin;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Default multiplier applied to simulated gas.
pub const DEFAULT_GAS_MULTIPLIER: f64 = 1.3;

fn split_amount(s: &str) -> Result<(&str, &str)> {
    let pos = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .ok_or_else(|| Error::InvalidCoin(format!("{s}: missing denom")))?;
    let (amount, denom) = s.split_at(pos);
    if amount.is_empty() {
        return Err(Error::InvalidCoin(format!("{s}: missing amount")));
    }
    validate_denom(denom)?;
    Ok((amount, denom))
}

fn validate_denom(denom: &str) -> Result<()> {
    let mut chars = denom.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
    if starts_with_letter && rest_valid && (3..=128).contains(&denom.len()) {
        Ok(())
    } else {
        Err(Error::InvalidCoin(format!("invalid denom {denom:?}")))
    }
}

/// Amount of a single token.
#[serde_with::serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Token identifier
    pub denom: String,
    /// Amount in the smallest unit
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub amount: u128,
}

impl Coin {
    pub fn new(amount: u128, denom: &str) -> Self {
        //! Create a coin without validating the denom.
        Self {
            denom: denom.to_string(),
            amount,
        }
    }
}

impl FromStr for Coin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        //! Parse `<integer><denom>`, e.g. `10000ujunox`.
        let (amount, denom) = split_amount(s.trim())?;
        let amount = amount
            .parse()
            .map_err(|_| Error::InvalidCoin(format!("{s}: amount must be a non-negative integer")))?;
        Ok(Self::new(amount, denom))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl From<Coin> for ProtoCoin {
    fn from(coin: Coin) -> Self {
        Self {
            denom: coin.denom,
            amount: coin.amount.to_string(),
        }
    }
}

impl TryFrom<ProtoCoin> for Coin {
    type Error = Error;

    fn try_from(coin: ProtoCoin) -> Result<Self> {
        let amount = coin
            .amount
            .parse()
            .map_err(|_| Error::InvalidCoin(format!("bad amount {:?}", coin.amount)))?;
        Ok(Self {
            denom: coin.denom,
            amount,
        })
    }
}

/// Price of one gas unit, kept as an exact decimal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GasPrice {
    /// Price scaled by `10^scale`
    mantissa: u128,
    /// Number of decimal places
    scale: u32,
    /// Fee token
    pub denom: String,
}

impl GasPrice {
    /// Maximal number of decimal places accepted.
    pub const MAX_SCALE: u32 = 18;

    pub fn fee(&self, gas_limit: u64) -> Coin {
        //! Fee for the given gas limit, rounded up.
        let divisor = 10u128.pow(self.scale);
        let scaled = self.mantissa.saturating_mul(u128::from(gas_limit));
        Coin::new(scaled.div_ceil(divisor), &self.denom)
    }
}

impl FromStr for GasPrice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        //! Parse `<decimal><denom>`, e.g. `0.025ujunox`.
        let (amount, denom) = split_amount(s.trim())?;
        let (int_part, frac_part) = amount.split_once('.').unwrap_or((amount, ""));
        if (int_part.is_empty() && frac_part.is_empty()) || frac_part.contains('.') {
            return Err(Error::InvalidCoin(format!("{s}: malformed decimal")));
        }
        let scale = frac_part.len() as u32;
        if scale > Self::MAX_SCALE {
            return Err(Error::InvalidCoin(format!(
                "{s}: more than {} decimal places",
                Self::MAX_SCALE
            )));
        }
        let mantissa = format!("{int_part}{frac_part}")
            .parse::<u128>()
            .map_err(|_| Error::InvalidCoin(format!("{s}: malformed decimal")))?;
        Ok(Self {
            mantissa,
            scale,
            denom: denom.to_string(),
        })
    }
}

impl fmt::Display for GasPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divisor = 10u128.pow(self.scale);
        let int_part = self.mantissa / divisor;
        if self.scale == 0 {
            write!(f, "{int_part}{}", self.denom)
        } else {
            let frac = self.mantissa % divisor;
            write!(
                f,
                "{int_part}.{frac:0width$}{}",
                self.denom,
                width = self.scale as usize
            )
        }
    }
}

/// How transaction gas and fees are determined.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum GasPolicy {
    /// Estimate by simulation, attach no fee.
    #[default]
    Auto,
    /// Estimate by simulation, pay `gas_limit * price`.
    Fixed(GasPrice),
}

impl GasPolicy {
    pub fn from_config(gas_price: Option<&str>) -> Result<Self> {
        //! Absent configuration means [`GasPolicy::Auto`].
        match gas_price.map(str::trim) {
            None | Some("") => Ok(Self::Auto),
            Some(price) => Ok(Self::Fixed(price.parse()?)),
        }
    }

    pub fn fee(&self, gas_limit: u64) -> Vec<Coin> {
        //! Fee amount for a transaction with the given gas limit.
        match self {
            Self::Auto => vec![],
            Self::Fixed(price) => vec![price.fee(gas_limit)],
        }
    }
}
