/// Formats an IDR amount for display, e.g. `92000` as `Rp 92.000`.
///
/// Thousands are grouped with `.` and no fraction digits are shown.
pub fn format_idr(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp {grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_idr() {
        assert_eq!(format_idr(0), "Rp 0");
        assert_eq!(format_idr(800), "Rp 800");
        assert_eq!(format_idr(8_000), "Rp 8.000");
        assert_eq!(format_idr(92_000), "Rp 92.000");
        assert_eq!(format_idr(1_250_000), "Rp 1.250.000");
    }
}
