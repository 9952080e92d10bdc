/// Street-type and directional words mapped to their postal short form.
/// No short form appears as a key, so applying the table twice is a no-op.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("street", "st"),
    ("avenue", "ave"),
    ("boulevard", "blvd"),
    ("drive", "dr"),
    ("road", "rd"),
    ("lane", "ln"),
    ("court", "ct"),
    ("place", "pl"),
    ("parkway", "pkwy"),
    ("highway", "hwy"),
    ("circle", "cir"),
    ("terrace", "ter"),
    ("north", "n"),
    ("south", "s"),
    ("east", "e"),
    ("west", "w"),
    ("northeast", "ne"),
    ("northwest", "nw"),
    ("southeast", "se"),
    ("southwest", "sw"),
    ("apartment", "apt"),
    ("suite", "ste"),
];

/// Marketing words that trail a property's proper name.
const GENERIC_SUFFIXES: &[&str] = &[
    "apartments",
    "residences",
    "homes",
    "towers",
    "place",
    "commons",
];

fn abbreviate(word: &str) -> &str {
    ABBREVIATIONS
        .iter()
        .find(|(full, _)| *full == word)
        .map(|(_, short)| *short)
        .unwrap_or(word)
}

/// Lowercase, drop `. , ; #`, shorten street types and directionals, collapse whitespace.
///
/// `"222 Main Street, Springfield"` → `"222 main st springfield"`.
pub fn normalize_address(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | ';' | '#'))
        .collect();
    stripped
        .split_whitespace()
        .map(abbreviate)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, drop a leading "the" and trailing generic suffixes, collapse whitespace.
///
/// `"The Oakwood Towers Apartments"` → `"oakwood"`. A name made only of
/// suffix words keeps its last word.
pub fn normalize_property_name(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut words: Vec<&str> = lowered.split_whitespace().collect();

    if words.len() > 1 && words[0] == "the" {
        words.remove(0);
    }
    while words.len() > 1 && words.last().is_some_and(|w| GENERIC_SUFFIXES.contains(w)) {
        words.pop();
    }

    words.join(" ")
}

/// Leading digit run of the address, or empty.
pub fn extract_street_number(address: &str) -> String {
    address
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect()
}

/// Street portion of an address: text before the first comma, normalized,
/// without the leading house number.
pub fn extract_street_name(address: &str) -> String {
    let street = address.split(',').next().unwrap_or("");
    normalize_address(street)
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_is_lowercased_and_abbreviated() {
        assert_eq!(
            normalize_address("222 North Main Street, Springfield, IL"),
            "222 n main st springfield il"
        );
        assert_eq!(normalize_address("10 Park Ave. #4B"), "10 park ave 4b");
    }

    #[test]
    fn address_whitespace_collapses() {
        assert_eq!(normalize_address("  5   Elm\tRoad  "), "5 elm rd");
    }

    #[test]
    fn address_normalization_is_idempotent() {
        let samples = [
            "222 Main Street, Springfield, IL",
            "1 N. West Boulevard; Suite 200",
            "PO Box #12",
            "",
            "   ",
            "The Place on Southwest Parkway",
        ];
        for raw in samples {
            let once = normalize_address(raw);
            assert_eq!(normalize_address(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn property_name_drops_article_and_suffixes() {
        assert_eq!(normalize_property_name("The Oakwood Apartments"), "oakwood");
        assert_eq!(normalize_property_name("Oak Towers Apartments"), "oak");
        assert_eq!(normalize_property_name("Maple  Commons"), "maple");
        assert_eq!(normalize_property_name("Theater District Lofts"), "theater district lofts");
    }

    #[test]
    fn property_name_of_only_suffix_is_kept() {
        assert_eq!(normalize_property_name("Apartments"), "apartments");
        assert_eq!(normalize_property_name("The"), "the");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize_address(""), "");
        assert_eq!(normalize_property_name(""), "");
        assert_eq!(extract_street_number(""), "");
        assert_eq!(extract_street_name(""), "");
    }

    #[test]
    fn street_number_is_leading_digits() {
        assert_eq!(extract_street_number("222 Main St"), "222");
        assert_eq!(extract_street_number("  15B Oak Ave"), "15");
        assert_eq!(extract_street_number("Main St"), "");
    }

    #[test]
    fn street_name_cuts_at_comma_and_drops_number() {
        assert_eq!(extract_street_name("222 Main Street, Springfield, IL"), "main st");
        assert_eq!(extract_street_name("Elm Avenue"), "elm ave");
    }
}
