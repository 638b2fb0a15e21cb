//! Formatting helpers for the presentation layer.

/// Truncates text to a maximum number of characters, appending `...` when
/// anything was cut.
///
/// Operates on character boundaries, so multi-byte text never gets sliced
/// mid-codepoint. Text at or under the limit is returned unchanged.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Formats a byte count as a human-readable size label.
///
/// Uses 1024-based units up to GB, with up to two decimal places and
/// trailing zeros trimmed: `0 Bytes`, `512 Bytes`, `1.5 KB`, `4.2 MB`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    const STEP: f64 = 1024.0;

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    #[allow(clippy::cast_precision_loss)]
    let bytes_f = bytes as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let exponent = (bytes_f.log2() / STEP.log2()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes_f / STEP.powi(i32::try_from(exponent).unwrap_or(0));

    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("abcdefghijk", 10), "abcdefg...");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "ملف التقرير السنوي للشركة عن الربع الثالث";
        let truncated = truncate(text, 12);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 12);
    }

    #[test]
    fn file_size_zero() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn file_size_bytes_and_kilobytes() {
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
    }

    #[test]
    fn file_size_megabytes() {
        assert_eq!(format_file_size(1_258_291), "1.2 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }

    #[test]
    fn file_size_caps_at_gigabytes() {
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024), "2 GB");
    }
}
