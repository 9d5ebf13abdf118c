//! Formatting utilities used for CLI and report outputs.

/// Currency rendering for HTML views: symbol, thousands separators, two
/// decimals (e.g. `₹1,234,567.89`). CSV exports never use this — they get
/// the bare number so spreadsheets can parse it.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let negative = amount < 0.0;
    let cents = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, grouped, frac_part)
}

/// Two-decimal hours cell, or the placeholder when nothing was recorded.
pub fn hours_cell(hours: f64, placeholder: &str) -> String {
    if hours > 0.0 {
        format!("{:.2}", hours)
    } else {
        placeholder.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(1_234_567.891, "₹"), "₹1,234,567.89");
        assert_eq!(format_currency(999.0, "₹"), "₹999.00");
        assert_eq!(format_currency(1_000.0, "$"), "$1,000.00");
        assert_eq!(format_currency(0.0, "₹"), "₹0.00");
    }

    #[test]
    fn negative_amounts_keep_sign_outside_symbol() {
        assert_eq!(format_currency(-1500.5, "₹"), "-₹1,500.50");
    }

    #[test]
    fn hours_cell_placeholder_when_zero() {
        assert_eq!(hours_cell(7.504, "-"), "7.50");
        assert_eq!(hours_cell(0.0, "-"), "-");
        assert_eq!(hours_cell(0.0, "0"), "0");
    }
}
