use regex::Regex;
use std::sync::OnceLock;

/// Segment used when a row carries no segment at all.
pub const SEGMENT_FALLBACK: &str = "general";

fn title_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Legacy convention: "[segment:vip] Welcome" encodes the campaign
        // segment inside the title. Kept only for rows written before the
        // structured segment column existed.
        Regex::new(r"^\[segment:([^\]]+)\]\s*(.*)$").unwrap()
    })
}

/// Split a legacy activity title into its segment and display title.
/// Titles without the prefix bucket to "general" and display unchanged.
pub fn parse_segment_title(title: &str) -> (String, String) {
    if let Some(caps) = title_prefix_re().captures(title) {
        let segment = caps[1].trim().to_string();
        let display = caps[2].to_string();
        if !segment.is_empty() {
            return (segment, display);
        }
    }
    (SEGMENT_FALLBACK.to_string(), title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_title_yields_segment_and_display_title() {
        let (segment, display) = parse_segment_title("[segment:vip] Welcome");
        assert_eq!(segment, "vip");
        assert_eq!(display, "Welcome");
    }

    #[test]
    fn test_plain_title_buckets_to_general() {
        let (segment, display) = parse_segment_title("Plain");
        assert_eq!(segment, "general");
        assert_eq!(display, "Plain");
    }

    #[test]
    fn test_empty_segment_prefix_falls_back() {
        let (segment, display) = parse_segment_title("[segment:] Hello");
        assert_eq!(segment, "general");
        assert_eq!(display, "[segment:] Hello");
    }

    #[test]
    fn test_prefix_mid_title_is_not_parsed() {
        let (segment, display) = parse_segment_title("News [segment:vip] inside");
        assert_eq!(segment, "general");
        assert_eq!(display, "News [segment:vip] inside");
    }
}
