/// Canonical key for every cell-value comparison in the pipeline:
/// surrounding whitespace ignored, case ignored.
pub fn normalize_for_comparison(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_for_comparison() {
        assert_eq!(normalize_for_comparison("  Base NORTE "), "base norte");
        assert_eq!(normalize_for_comparison("São Paulo"), "são paulo");
        assert_eq!(normalize_for_comparison(""), "");
        assert_eq!(normalize_for_comparison("  "), "");
    }
}
