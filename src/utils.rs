use unicode_width::UnicodeWidthStr;

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.width() <= max_len {
        s.to_string()
    } else {
        let mut out = String::new();
        let mut width = 0;
        for ch in s.chars() {
            let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1);
            if width + w > max_len.saturating_sub(3) {
                break;
            }
            out.push(ch);
            width += w;
        }
        format!("{}...", out)
    }
}

/// Percentages are shown with one decimal place; the underlying
/// score/total stay exact integers from the scorer.
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

pub fn format_elapsed(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation() {
        assert_eq!(truncate_string("Short string", 20), "Short string");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        let result = truncate_string("This is a very long string that should be truncated", 20);
        assert_eq!(result, "This is a very lo...");
        assert!(result.len() <= 20);
    }

    #[test]
    fn test_truncate_string_empty() {
        assert_eq!(truncate_string("", 20), "");
    }

    #[test]
    fn test_format_percentage_one_decimal() {
        assert_eq!(format_percentage(80.0), "80.0%");
        assert_eq!(format_percentage(66.666), "66.7%");
        assert_eq!(format_percentage(100.0), "100.0%");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(45), "45s");
        assert_eq!(format_elapsed(75), "1m 15s");
        assert_eq!(format_elapsed(600), "10m 00s");
    }
}
