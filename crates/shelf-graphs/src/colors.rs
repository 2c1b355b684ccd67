//! Source colours for charts.

/// Fixed colours of the known sources.
pub const SOURCE_COLORS: [(&str, &str); 5] = [
    ("Substack", "#667eea"),
    ("freeCodeCamp", "#764ba2"),
    ("GitHub", "#f093fb"),
    ("Shopify", "#4facfe"),
    ("Stripe", "#00f2fe"),
];

/// Border colour of stacked month bars.
pub const DATASET_BORDER_COLOR: &str = "#2d3748";

/// Colour of `source`: fixed for known sources, hashed otherwise.
pub fn source_color(source: &str) -> String {
    SOURCE_COLORS
        .iter()
        .find(|(name, _)| *name == source)
        .map_or_else(|| format!("#{}", color_hash(source)), |(_, color)| (*color).to_string())
}

/// djb2 hash of `text` as six lowercase hex digits.
pub fn color_hash(text: &str) -> String {
    let hash = text
        .bytes()
        .fold(5381u32, |h, b| h.wrapping_mul(33).wrapping_add(u32::from(b)));
    format!("{:06x}", hash % 16_777_215)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sources() {
        assert_eq!(source_color("Substack"), "#667eea");
        assert_eq!(source_color("Stripe"), "#00f2fe");
    }

    #[test]
    fn test_hashed_sources() {
        assert_eq!(color_hash("A"), "02b5e6");
        assert_eq!(source_color("Indie Blog"), "#860626");
        assert_eq!(source_color("Medium"), "#d88ce8");
        // lookup is case-sensitive
        assert_eq!(source_color("github"), format!("#{}", color_hash("github")));
    }

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(color_hash("Unknown"), color_hash("Unknown"));
        assert_eq!(color_hash("Unknown").len(), 6);
    }
}
