//! Price rendering configuration.
//!
//! The dealership displays euro amounts with French number formatting.
//! Rendering receives this object explicitly instead of relying on a
//! process-wide locale.

#[derive(Clone, Debug)]
pub struct PriceFormat {
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub thousands_separator: char,
}

impl Default for PriceFormat {
    fn default() -> Self {
        // fr-FR: 11 000,00 €
        Self {
            currency_symbol: "€".to_string(),
            decimal_separator: ',',
            thousands_separator: '\u{202f}',
        }
    }
}

impl PriceFormat {
    /// Render an amount with two decimals, grouped thousands and a
    /// trailing currency symbol.
    pub fn format(&self, amount: f64) -> String {
        let negative = amount < 0.0;
        let cents = (amount.abs() * 100.0).round() as u64;
        let whole = cents / 100;
        let frac = cents % 100;

        let digits = whole.to_string();
        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(c);
        }

        format!(
            "{}{}{}{:02} {}",
            if negative { "-" } else { "" },
            grouped,
            self.decimal_separator,
            frac,
            self.currency_symbol
        )
    }
}
