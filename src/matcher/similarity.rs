use strsim::levenshtein;

/// Edit-distance similarity as an integer percentage.
///
/// `round((max_len - distance) / max_len * 100)`, measured in chars.
/// Two empty strings are identical (100); exactly one empty scores 0.
pub fn similarity(a: &str, b: &str) -> u8 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let distance = levenshtein(a, b);
    let ratio = (max_len - distance) as f64 / max_len as f64;
    (ratio * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(similarity("main st", "main st"), 100);
        assert_eq!(similarity("x", "x"), 100);
    }

    #[test]
    fn empty_edge_cases() {
        assert_eq!(similarity("", ""), 100);
        assert_eq!(similarity("", "x"), 0);
        assert_eq!(similarity("abc", ""), 0);
    }

    #[test]
    fn partial_similarity_rounds() {
        // kitten → sitting: distance 3 over 7 chars → 57.14 → 57
        assert_eq!(similarity("kitten", "sitting"), 57);
        // one substitution in four chars
        assert_eq!(similarity("oaks", "oak "), 75);
    }

    #[test]
    fn completely_different_scores_0() {
        assert_eq!(similarity("abc", "xyz"), 0);
    }

    #[test]
    fn symmetric() {
        assert_eq!(similarity("maple", "apple"), similarity("apple", "maple"));
    }

    #[test]
    fn counts_chars_not_bytes() {
        // one substitution in five chars, multi-byte on one side
        assert_eq!(similarity("café!", "cafe!"), 80);
    }
}
