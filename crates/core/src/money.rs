//! Currency formatting for invoices and receipts.

/// Format an integer-cents amount for display.
///
/// The stored amount is divided by 100 and rendered with two decimals,
/// thousands separators, and the currency's symbol. Unknown currencies
/// fall back to `"{amount} {CODE}"`.
pub fn format_currency(amount_cents: i64, currency: &str) -> String {
    let sign = if amount_cents < 0 { "-" } else { "" };
    let cents = amount_cents.unsigned_abs();
    let body = format!("{}.{:02}", group_thousands(cents / 100), cents % 100);

    match currency.to_ascii_uppercase().as_str() {
        "USD" | "MXN" => format!("{sign}${body}"),
        "EUR" => format!("{sign}\u{20ac}{body}"),
        "GBP" => format!("{sign}\u{a3}{body}"),
        other => format!("{sign}{body} {other}"),
    }
}

fn group_thousands(units: u64) -> String {
    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_usd_with_symbol() {
        assert_eq!(format_currency(29_900, "USD"), "$299.00");
    }

    #[test]
    fn pads_cents_to_two_digits() {
        assert_eq!(format_currency(5, "USD"), "$0.05");
        assert_eq!(format_currency(150, "USD"), "$1.50");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(123_456_789, "USD"), "$1,234,567.89");
    }

    #[test]
    fn renders_negative_amounts() {
        assert_eq!(format_currency(-29_900, "USD"), "-$299.00");
    }

    #[test]
    fn falls_back_to_code_suffix() {
        assert_eq!(format_currency(29_900, "JPY"), "299.00 JPY");
    }

    #[test]
    fn currency_codes_are_case_insensitive() {
        assert_eq!(format_currency(29_900, "usd"), "$299.00");
    }
}
