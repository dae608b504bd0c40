//! Rank-range labels: "7" is the single-rank form, "3-10" covers ranks 3..=10.
//! Malformed tokens parse to 0 and are rejected downstream by the validator.

/// Parse a tier label into a (start, end) rank pair. `end == 0` means the
/// single-rank form where the effective end equals the start.
pub fn parse_label(label: &str) -> (i64, i64) {
    if label.trim().is_empty() {
        return (0, 0);
    }
    let mut parts = label.split('-').map(str::trim);
    let first = parts.next().unwrap_or("");
    match parts.next() {
        None => (parse_rank(first), 0),
        // extra segments past the second are ignored, matching the builder UI
        Some(second) => (parse_rank(first), parse_rank(second)),
    }
}

fn parse_rank(token: &str) -> i64 {
    token.parse::<i64>().unwrap_or(0)
}

/// Inclusive upper rank bound of a tier; defaults to the start when the stored
/// end is the 0 sentinel.
pub fn effective_end(start: i64, end: i64) -> i64 {
    if end > 0 {
        end
    } else {
        start
    }
}

/// Derived payout for one tier: rank count times per-user amount. Returns 0.0
/// when the amount field is empty, non-numeric, or zero.
pub fn tier_amount(start: i64, end: i64, amount_per_user: &str) -> f64 {
    let amount = parse_decimal(amount_per_user).unwrap_or(0.0);
    if amount == 0.0 {
        return 0.0;
    }
    let count = (effective_end(start, end) - start + 1).max(0);
    count as f64 * amount
}

/// Decimal form fields arrive as raw text; None when empty or non-numeric.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
