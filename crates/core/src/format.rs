use uuid::Uuid;

/// Generate a fresh allocation id. Unique for the lifetime of the process.
pub fn generate_id() -> Uuid {
    Uuid::new_v4()
}

/// Format an amount as whole US dollars, e.g. `$10,000` or `-$1,250`.
pub fn format_currency(amount: f64) -> String {
    format_currency_in(amount, "USD")
}

/// Format an amount as a whole-unit value in `currency`.
///
/// Rounds half away from zero. Unknown currency codes are appended as a
/// suffix (`1,000 PLN`).
pub fn format_currency_in(amount: f64, currency: &str) -> String {
    let rounded = amount.round();
    // -0.4 rounds to -0 and must not print a sign
    let negative = rounded < 0.0;
    let digits = group_thousands(rounded.abs() as u64);
    let sign = if negative { "-" } else { "" };

    match currency.to_uppercase().as_str() {
        "USD" | "CAD" | "AUD" | "HKD" | "SGD" => format!("{sign}${digits}"),
        "GBP" => format!("{sign}£{digits}"),
        "JPY" => format!("{sign}¥{digits}"),
        "EUR" => format!("{sign}{digits} €"),
        other => format!("{sign}{digits} {other}"),
    }
}

fn group_thousands(value: u64) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
