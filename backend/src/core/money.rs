//! Money helpers
//!
//! CRITICAL: All money values are i64 (cents). Floats never hold amounts;
//! they only appear in ratios such as progress percentages.

/// Cents per dollar
pub const CENTS_PER_DOLLAR: i64 = 100;

/// Format a cent amount as a plain dollar figure
///
/// Whole-dollar amounts print without a fractional part, which is how
/// project budgets are quoted to the advisory service.
///
/// # Example
/// ```
/// use milestone_treasury_core_rs::core::format_dollars;
///
/// assert_eq!(format_dollars(450_000), "4500");
/// assert_eq!(format_dollars(450_050), "4500.50");
/// assert_eq!(format_dollars(-125), "-1.25");
/// ```
pub fn format_dollars(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let per = CENTS_PER_DOLLAR.unsigned_abs();
    let (dollars, rest) = (abs / per, abs % per);
    if rest == 0 {
        format!("{}{}", sign, dollars)
    } else {
        format!("{}{}.{:02}", sign, dollars, rest)
    }
}
