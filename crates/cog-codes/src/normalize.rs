//! Input normalization shared by all tables.

/// Forward-index key for a name: trimmed and lower-cased.
///
/// Two names with the same key are the same entry for lookup purposes,
/// which is how same-named communes end up under one key.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Bidirectional containment used by the substring fallback.
///
/// Matches when the input is part of the key (`"rhône"` in
/// `"auvergne-rhône-alpes"`) or the key is part of the input
/// (`"mans"` in `"le mans"`).
pub fn overlaps(input: &str, key: &str) -> bool {
    key.contains(input) || input.contains(key)
}

/// Returns the hint as a departement code when it is already one.
///
/// Bare codes are all-digit strings or the two Corsican codes. Anything else
/// must go through departement name resolution.
///
/// ```
/// use cog_codes::normalize::as_departement_code;
///
/// assert_eq!(as_departement_code(" 38 ").as_deref(), Some("38"));
/// assert_eq!(as_departement_code("2b").as_deref(), Some("2B"));
/// assert_eq!(as_departement_code("Isère"), None);
/// ```
pub fn as_departement_code(hint: &str) -> Option<String> {
    let hint = hint.trim();
    if hint.is_empty() {
        return None;
    }
    if hint.bytes().all(|b| b.is_ascii_digit()) {
        return Some(hint.to_string());
    }
    if hint.eq_ignore_ascii_case("2A") || hint.eq_ignore_ascii_case("2B") {
        return Some(hint.to_ascii_uppercase());
    }
    None
}

/// Returns the input as a section code when it is a single letter `A`..=`U`.
///
/// ```
/// use cog_codes::normalize::as_section_code;
///
/// assert_eq!(as_section_code("f"), Some('F'));
/// assert_eq!(as_section_code(" U "), Some('U'));
/// assert_eq!(as_section_code("V"), None);
/// assert_eq!(as_section_code("FA"), None);
/// ```
pub fn as_section_code(input: &str) -> Option<char> {
    let mut chars = input.trim().chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let upper = first.to_ascii_uppercase();
    ('A'..='U').contains(&upper).then_some(upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key_trims_and_lowercases() {
        assert_eq!(normalize_key("  Auvergne-Rhône-Alpes "), "auvergne-rhône-alpes");
        assert_eq!(normalize_key("ÎLE-DE-FRANCE"), "île-de-france");
    }

    #[test]
    fn test_overlaps_both_directions() {
        assert!(overlaps("rhône", "auvergne-rhône-alpes"));
        assert!(overlaps("le mans", "mans"));
        assert!(!overlaps("lyon", "grenoble"));
    }

    #[test]
    fn test_departement_code_detection() {
        assert_eq!(as_departement_code("971").as_deref(), Some("971"));
        assert_eq!(as_departement_code("2A").as_deref(), Some("2A"));
        assert_eq!(as_departement_code("   "), None);
        assert_eq!(as_departement_code("2C"), None);
        assert_eq!(as_departement_code("Rhône"), None);
    }

    #[test]
    fn test_section_code_detection() {
        for letter in 'A'..='U' {
            assert_eq!(as_section_code(&letter.to_string()), Some(letter));
            assert_eq!(
                as_section_code(&letter.to_ascii_lowercase().to_string()),
                Some(letter)
            );
        }
        assert_eq!(as_section_code(""), None);
        assert_eq!(as_section_code("Z"), None);
        assert_eq!(as_section_code("É"), None);
    }
}
