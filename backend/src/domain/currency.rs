//! Currency conversion and display formatting.
//!
//! Rates are fixed constants against the base currency, not live-fetched.
//! Conversion normalizes through the base with plain f64 arithmetic, which
//! is fine for display but not for ledger-grade accounting.

use serde::Serialize;

/// Base currency every rate is expressed against
pub const BASE_CURRENCY: &str = "BRL";

/// Format descriptor and conversion rate for one currency
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CurrencyFormat {
    pub code: &'static str,
    pub symbol: &'static str,
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub decimal_places: usize,
    /// Value of one unit of this currency in base-currency units
    pub rate_to_base: f64,
}

static CURRENCIES: &[CurrencyFormat] = &[
    CurrencyFormat {
        code: "BRL",
        symbol: "R$",
        thousands_separator: '.',
        decimal_separator: ',',
        decimal_places: 2,
        rate_to_base: 1.0,
    },
    CurrencyFormat {
        code: "USD",
        symbol: "$",
        thousands_separator: ',',
        decimal_separator: '.',
        decimal_places: 2,
        rate_to_base: 5.0,
    },
    CurrencyFormat {
        code: "EUR",
        symbol: "€",
        thousands_separator: '.',
        decimal_separator: ',',
        decimal_places: 2,
        rate_to_base: 5.4,
    },
    CurrencyFormat {
        code: "GBP",
        symbol: "£",
        thousands_separator: ',',
        decimal_separator: '.',
        decimal_places: 2,
        rate_to_base: 6.3,
    },
    CurrencyFormat {
        code: "JPY",
        symbol: "¥",
        thousands_separator: ',',
        decimal_separator: '.',
        decimal_places: 0,
        rate_to_base: 0.034,
    },
];

/// Every supported currency, base first
pub fn all_currencies() -> &'static [CurrencyFormat] {
    CURRENCIES
}

/// Descriptor for a currency code; unknown or absent codes fall back to the
/// base currency
pub fn active_currency(code: Option<&str>) -> &'static CurrencyFormat {
    code.and_then(|c| CURRENCIES.iter().find(|cur| cur.code == c))
        .unwrap_or(&CURRENCIES[0])
}

/// Convert an amount between currencies via the base rate table
pub fn convert_currency(amount: f64, from: &str, to: &str) -> f64 {
    if from == to {
        return amount;
    }

    let from = active_currency(Some(from));
    let to = active_currency(Some(to));

    let in_base = amount * from.rate_to_base;
    in_base / to.rate_to_base
}

/// Render an amount with the currency's symbol and separators,
/// e.g. `R$ 1.234,50`
pub fn format_currency(amount: f64, code: &str) -> String {
    let currency = active_currency(Some(code));

    let negative = amount < 0.0;
    let rendered = format!("{:.*}", currency.decimal_places, amount.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(currency.thousands_separator);
        }
        grouped.push(*ch);
    }

    let mut result = format!("{} ", currency.symbol);
    if negative {
        result.push('-');
    }
    result.push_str(&grouped);
    if let Some(frac) = frac_part {
        result.push(currency.decimal_separator);
        result.push_str(frac);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_currency_conversion_is_identity() {
        assert_eq!(convert_currency(123.45, "BRL", "BRL"), 123.45);
        assert_eq!(convert_currency(0.0, "USD", "USD"), 0.0);
    }

    #[test]
    fn test_conversion_round_trip() {
        let amount = 250.0;
        let through_usd = convert_currency(convert_currency(amount, "BRL", "USD"), "USD", "BRL");
        assert!((through_usd - amount).abs() < 1e-9);

        let through_eur = convert_currency(convert_currency(amount, "BRL", "EUR"), "EUR", "BRL");
        assert!((through_eur - amount).abs() < 1e-9);
    }

    #[test]
    fn test_conversion_goes_through_base() {
        // 1 USD is 5 BRL
        assert_eq!(convert_currency(10.0, "USD", "BRL"), 50.0);
        assert_eq!(convert_currency(50.0, "BRL", "USD"), 10.0);
    }

    #[test]
    fn test_active_currency_fallback() {
        assert_eq!(active_currency(None).code, "BRL");
        assert_eq!(active_currency(Some("XYZ")).code, "BRL");
        assert_eq!(active_currency(Some("USD")).code, "USD");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5, "BRL"), "R$ 1.234,50");
        assert_eq!(format_currency(1234.5, "USD"), "$ 1,234.50");
    }

    #[test]
    fn test_format_currency_small_and_large() {
        assert_eq!(format_currency(7.0, "BRL"), "R$ 7,00");
        assert_eq!(format_currency(1234567.89, "USD"), "$ 1,234,567.89");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-1234.5, "BRL"), "R$ -1.234,50");
    }

    #[test]
    fn test_format_currency_zero_decimal_places() {
        assert_eq!(format_currency(1234.5, "JPY"), "¥ 1,235");
    }

    #[test]
    fn test_unknown_code_formats_as_base() {
        assert_eq!(format_currency(10.0, "XYZ"), "R$ 10,00");
    }
}
