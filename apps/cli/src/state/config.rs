//! # Display Configuration
//!
//! Currency formatting for the tables, taken from the `[display]` section.

use ventas_core::Money;
use ventas_gateway::DisplaySettings;

/// Read-only after startup.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Currency symbol for display (e.g., "$")
    pub currency_symbol: String,

    /// Decimal places shown (0-2)
    pub currency_decimals: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig::from(&DisplaySettings::default())
    }
}

impl From<&DisplaySettings> for DisplayConfig {
    fn from(settings: &DisplaySettings) -> Self {
        DisplayConfig {
            currency_symbol: settings.currency_symbol.clone(),
            currency_decimals: settings.currency_decimals.min(2),
        }
    }
}

impl DisplayConfig {
    /// Formats a money value with the configured symbol and decimals.
    ///
    /// Fewer than two decimals round half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_cli::state::DisplayConfig;
    /// use ventas_core::Money;
    ///
    /// let config = DisplayConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let decimals = u32::from(self.currency_decimals.min(2));
        let step = 10_u64.pow(2 - decimals);
        let cents = amount.cents();

        // Round to the displayed precision; |i64::MIN| + 50 still fits u64
        let scaled = (cents.unsigned_abs() + step / 2) / step;
        let divisor = 10_u64.pow(decimals);
        let whole = scaled / divisor;
        let frac = scaled % divisor;

        format!(
            "{}{}{}",
            if cents < 0 && scaled != 0 { "-" } else { "" },
            self.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole, frac, width = decimals as usize)
            } else {
                whole.to_string()
            }
        )
    }

    /// Formats an amount as sent by the gateway. A non-finite amount is
    /// shown as zero.
    pub fn format_amount(&self, amount: f64) -> String {
        self.format_money(Money::from_decimal(amount).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(symbol: &str, decimals: u8) -> DisplayConfig {
        DisplayConfig {
            currency_symbol: symbol.to_string(),
            currency_decimals: decimals,
        }
    }

    #[test]
    fn test_format_money_positive() {
        let config = DisplayConfig::default();
        assert_eq!(config.format_money(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_money(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_money(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_money(Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_format_money_negative() {
        let config = DisplayConfig::default();
        assert_eq!(config.format_money(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_money_fewer_decimals() {
        assert_eq!(config("€", 1).format_money(Money::from_cents(1235)), "€12.4");
        assert_eq!(config("ARS ", 0).format_money(Money::from_cents(1250)), "ARS 13");
        assert_eq!(config("ARS ", 0).format_money(Money::from_cents(1249)), "ARS 12");
        assert_eq!(config("$", 0).format_money(Money::from_cents(-40)), "$0");
    }

    #[test]
    fn test_format_amount() {
        let config = DisplayConfig::default();
        assert_eq!(config.format_amount(15.5), "$15.50");
        assert_eq!(config.format_amount(f64::NAN), "$0.00");
    }

    #[test]
    fn test_format_money_at_the_cent_range_limits() {
        let config = DisplayConfig::default();
        assert_eq!(config.format_money(Money::from_cents(i64::MIN)), "-$92233720368547758.08");
        assert_eq!(config.format_money(Money::from_cents(i64::MAX)), "$92233720368547758.07");
        assert_eq!(config.format_amount(-9.223372036854776e16), "-$92233720368547758.08");
        assert_eq!(
            self::config("$", 0).format_money(Money::from_cents(i64::MIN)),
            "-$92233720368547758"
        );
    }
}
