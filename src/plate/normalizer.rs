use crate::error::PlateError;

/// Longest raw plate accepted, after trimming.
pub const MAX_PLATE_LEN: usize = 20;

/// The two cleaned forms of an input plate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPlate {
    /// Uppercase ASCII alphanumerics only. Used for the standard and
    /// non-standard grammars.
    pub compact: String,
    /// Same, but hyphens kept. Used only for old-military detection.
    pub hyphenated: String,
}

/// Clean a raw (possibly OCR-derived) plate string.
pub fn normalize(raw: &str) -> Result<NormalizedPlate, PlateError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(PlateError::InvalidInput(
            "Plate number cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_PLATE_LEN {
        return Err(PlateError::InvalidInput(format!(
            "Plate number must be at most {MAX_PLATE_LEN} characters"
        )));
    }

    let compact = compact_form(trimmed);
    if compact.is_empty() {
        return Err(PlateError::InvalidInput("Invalid plate format".to_string()));
    }

    Ok(NormalizedPlate {
        compact,
        hyphenated: hyphenated_form(trimmed),
    })
}

/// Uppercase and drop everything that is not an ASCII letter or digit.
pub fn compact_form(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Like [`compact_form`] but keeps `-` separators.
pub fn hyphenated_form(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_separators_and_uppercases() {
        let n = normalize("  b 1234-abc ").unwrap();
        assert_eq!(n.compact, "B1234ABC");
        assert_eq!(n.hyphenated, "B1234-ABC");
    }

    #[test]
    fn test_military_keeps_hyphen() {
        let n = normalize("12345 - 00").unwrap();
        assert_eq!(n.hyphenated, "12345-00");
        assert_eq!(n.compact, "1234500");
    }

    #[test]
    fn test_discards_unsafe_characters() {
        let n = normalize("B<1234>;ABC").unwrap();
        assert_eq!(n.compact, "B1234ABC");
        assert_eq!(n.hyphenated, "B1234ABC");
    }

    #[test]
    fn test_empty_after_trim() {
        assert!(matches!(normalize("   "), Err(PlateError::InvalidInput(_))));
        assert!(matches!(normalize(""), Err(PlateError::InvalidInput(_))));
    }

    #[test]
    fn test_nothing_usable() {
        assert_eq!(
            normalize("???"),
            Err(PlateError::InvalidInput("Invalid plate format".to_string()))
        );
        assert!(matches!(normalize("- -"), Err(PlateError::InvalidInput(_))));
    }

    #[test]
    fn test_too_long() {
        assert!(normalize("B 1234 ABC").is_ok());
        assert!(matches!(
            normalize("B12345678901234567890X"),
            Err(PlateError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_compact_form_idempotent() {
        for s in ["b-1234-abc", " 12345-00 ", "ri 1", "??", "Ünïcödé 7", ""] {
            let once = compact_form(s);
            assert_eq!(compact_form(&once), once);
        }
    }
}
