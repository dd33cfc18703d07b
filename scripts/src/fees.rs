//! Gas fee conversion from wei to native units and USD

use alloy::primitives::{utils::format_ether, U256};

/// The fee paid by a mined transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionFee {
    /// Gas consumed by the transaction
    pub gas_used: u128,
    /// Effective price paid per gas unit, in wei
    pub gas_price: u128,
}

impl TransactionFee {
    /// Build the fee of a transaction
    pub fn new(gas_used: u128, gas_price: u128) -> Self {
        Self {
            gas_used,
            gas_price,
        }
    }

    /// Exact fee in wei
    pub fn wei(&self) -> U256 {
        U256::from(self.gas_used) * U256::from(self.gas_price)
    }

    /// Fee in native units, as decimal text without trailing zeros
    pub fn native(&self) -> String {
        trim_decimals(format_ether(self.wei()))
    }

    /// Fee in native units, as a float
    pub fn native_f64(&self) -> f64 {
        // `native` only ever yields digits and one dot
        self.native().parse().unwrap_or(0.0)
    }

    /// Fee converted to USD with the given native to USD rate
    pub fn usd(&self, usd_rate: f64) -> f64 {
        self.native_f64() * usd_rate
    }
}

/// Format a USD amount for display
pub fn format_usd(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Strip trailing zeros, keeping at least one decimal
fn trim_decimals(value: String) -> String {
    match value.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            let frac = if frac.is_empty() { "0" } else { frac };
            format!("{int}.{frac}")
        }
        None => format!("{value}.0"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_fee() {
        let fee = TransactionFee::new(21_000, 50_000_000_000);

        assert_eq!(fee.wei(), U256::from(1_050_000_000_000_000u64));
        assert_eq!(fee.native(), "0.00105");
        assert!((fee.native_f64() - 0.00105).abs() < f64::EPSILON);
        assert_eq!(format_usd(fee.usd(2000.0)), "2.10");
    }

    #[test]
    fn test_usd_uses_given_rate() {
        let fee = TransactionFee::new(2_500_000, 3_000_000_000);

        assert_eq!(fee.native(), "0.0075");
        assert_eq!(format_usd(fee.usd(2000.0)), "15.00");
        assert_eq!(format_usd(fee.usd(600.0)), "4.50");
    }

    #[test]
    fn test_large_fee_is_exact_in_wei() {
        let fee = TransactionFee::new(u128::from(u64::MAX), u128::from(u64::MAX));

        assert_eq!(
            fee.wei(),
            U256::from(u64::MAX) * U256::from(u64::MAX),
        );
        assert!(fee.native().starts_with("340282366920938463426."));
    }

    #[test]
    fn test_zero_fee() {
        let fee = TransactionFee::new(0, 1_000_000_000);

        assert_eq!(fee.native(), "0.0");
        assert_eq!(format_usd(fee.usd(2000.0)), "0.00");
    }

    #[test]
    fn test_trim_decimals() {
        assert_eq!(trim_decimals("1.000000000000000000".to_string()), "1.0");
        assert_eq!(trim_decimals("12.340000".to_string()), "12.34");
        assert_eq!(trim_decimals("7".to_string()), "7.0");
    }
}
