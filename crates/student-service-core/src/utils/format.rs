/// Remove all whitespace, so "Ava  Vale" compares equal to "avavale".
pub fn compact(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Cut `s` to at most `width` characters, marking the cut with `...`.
pub fn truncate_string(s: &str, width: usize) -> String {
    let Some((cut, _)) = s.char_indices().nth(width) else {
        return s.to_string();
    };
    if width <= 3 {
        return s[..cut].to_string();
    }
    // Byte offset of the last character that still fits beside the marker
    let keep = s.char_indices().nth(width - 3).map_or(cut, |(i, _)| i);
    format!("{}...", &s[..keep])
}

/// Fall back to `default` for missing and empty values.
pub fn format_optional(value: Option<&str>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Render backend dates (`2025-09-01` or RFC 3339) as `Sep 01, 2025`.
///
/// Anything unparseable is shown as-is.
pub fn format_date(raw: &str) -> String {
    const DISPLAY: &str = "%b %d, %Y";
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.format(DISPLAY).to_string())
        .or_else(|_| {
            chrono::DateTime::parse_from_rfc3339(raw).map(|dt| dt.format(DISPLAY).to_string())
        })
        .unwrap_or_else(|_| raw.to_string())
}
