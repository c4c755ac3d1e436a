//! Voucher number sequence math and rendering.

/// Next sequence from a committed-document count: `count + 1`.
#[must_use]
pub const fn next_from_count(count: u64) -> u64 {
    count + 1
}

/// Next sequence for the draft-metal module: one past the highest numeric
/// suffix among prior voucher codes with this prefix.
///
/// Draft deletions must not free numbers for re-use, so a count would be
/// wrong here; the scan survives gaps left by deleted drafts. Codes with a
/// different prefix or a non-numeric suffix are ignored.
#[must_use]
pub fn next_from_draft_codes<'a, I>(codes: I, prefix: &str) -> u64
where
    I: IntoIterator<Item = &'a str>,
{
    codes
        .into_iter()
        .filter_map(|code| {
            let suffix = code.strip_prefix(prefix)?;
            suffix.parse::<u64>().ok()
        })
        .max()
        .map_or(1, |max| max + 1)
}

/// Renders a voucher number: prefix plus the zero-padded sequence.
///
/// If the sequence outgrows the configured width, the number widens rather
/// than truncates.
#[must_use]
pub fn render_number(prefix: &str, sequence: u64, number_length: u32) -> String {
    format!(
        "{prefix}{sequence:0width$}",
        width = number_length as usize
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_from_count() {
        assert_eq!(next_from_count(0), 1);
        assert_eq!(next_from_count(6), 7);
    }

    #[test]
    fn test_render_number_pads() {
        assert_eq!(render_number("SAL", 7, 4), "SAL0007");
        assert_eq!(render_number("PF", 123, 4), "PF0123");
        assert_eq!(render_number("OSB", 42, 4), "OSB0042");
    }

    #[test]
    fn test_render_number_widens_on_overflow() {
        assert_eq!(render_number("SAL", 123_456, 4), "SAL123456");
    }

    #[test]
    fn test_draft_max_suffix_skips_gaps() {
        // DRF0002 was deleted; the next draft must not reuse its number.
        let codes = ["DRF0001", "DRF0003", "DRF0007"];
        assert_eq!(next_from_draft_codes(codes, "DRF"), 8);
    }

    #[test]
    fn test_draft_max_suffix_ignores_foreign_prefixes() {
        let codes = ["DRF0004", "SAL0100", "DRFX"];
        assert_eq!(next_from_draft_codes(codes, "DRF"), 5);
    }

    #[test]
    fn test_draft_max_suffix_empty_starts_at_one() {
        assert_eq!(next_from_draft_codes([], "DRF"), 1);
    }
}
