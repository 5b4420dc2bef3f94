//! Parsing the model's title list.

/// Split a title list into individual titles
///
/// Lines are trimmed, blank lines dropped and colons replaced with
/// hyphens. Source order is kept and duplicates are not removed.
pub fn parse_title_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.replace(':', "-"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_and_colons() {
        let text = "\n  Solar Energy: An Overview  \n\n   \nPhotovoltaics\r\nStorage: Batteries: Costs\n";
        assert_eq!(
            parse_title_list(text),
            vec![
                "Solar Energy- An Overview",
                "Photovoltaics",
                "Storage- Batteries- Costs",
            ]
        );
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        assert_eq!(parse_title_list("B\nA\nB"), vec!["B", "A", "B"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_title_list("").is_empty());
        assert!(parse_title_list(" \n\t\n").is_empty());
    }
}
