use serde::Serialize;

const MILITARY_NUMBER_NOTE: &str = "Nomor kendaraan harus 4 atau 5 digit";
const MILITARY_SUFFIX_NOTE: &str = "Suffix harus berupa angka 00-99 atau angka Romawi I-IX";
const UNMAPPED_SUFFIX_NOTE: &str = "Suffix tidak dapat dipetakan ke institusi yang dikenal";

/// Every way a single plate lookup can fail.
///
/// These are values, not panics: a batch of lookups keeps going when one
/// of them ends up here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlateError {
    /// Empty, oversized, or nothing usable left after cleaning.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Hyphenated military shape whose number or suffix fails the grammar.
    #[error("malformed military plate: {0}")]
    MalformedMilitaryPlate(MilitaryDefect),

    /// Suffix accepted by the classifier but absent from the suffix map.
    /// Unreachable while the map covers every valid suffix.
    #[error("unknown military suffix mapping: {0}")]
    UnmappedMilitarySuffix(String),

    #[error("plate {0} is not registered")]
    PlateNotRegistered(String),

    #[error("region lookup failed: {reason}")]
    ExternalServiceError { reason: String, timed_out: bool },

    #[error("unrecognized plate format")]
    Unrecognized,
}

/// The part of an old-military plate that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MilitaryDefect {
    VehicleNumber(String),
    Suffix(String),
}

impl std::fmt::Display for MilitaryDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MilitaryDefect::VehicleNumber(n) => write!(f, "invalid number format {n}"),
            MilitaryDefect::Suffix(s) => write!(f, "invalid military suffix {s}"),
        }
    }
}

/// Serialized error shape: `{error, note?, valid_suffixes?}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_suffixes: Option<ValidSuffixes>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidSuffixes {
    pub numeric: &'static str,
    pub roman: &'static str,
}

impl ValidSuffixes {
    pub fn military() -> Self {
        Self {
            numeric: "00-99",
            roman: "I, II, III, IV, V, VI, VII, VIII, IX",
        }
    }
}

impl PlateError {
    /// HTTP-equivalent status a service layer maps this error to.
    pub fn status_code(&self) -> u16 {
        match self {
            PlateError::InvalidInput(_)
            | PlateError::MalformedMilitaryPlate(_)
            | PlateError::Unrecognized => 400,
            PlateError::PlateNotRegistered(_) => 404,
            PlateError::ExternalServiceError { .. } => 502,
            PlateError::UnmappedMilitarySuffix(_) => 500,
        }
    }

    /// Caller-facing body with the corrective hint, if any.
    pub fn body(&self) -> ErrorBody {
        let (error, note, valid_suffixes) = match self {
            PlateError::InvalidInput(reason) => (reason.clone(), None, None),
            PlateError::MalformedMilitaryPlate(MilitaryDefect::VehicleNumber(n)) => (
                format!("Invalid number format: {n}"),
                Some(MILITARY_NUMBER_NOTE),
                None,
            ),
            PlateError::MalformedMilitaryPlate(MilitaryDefect::Suffix(s)) => (
                format!("Invalid military suffix: {s}"),
                Some(MILITARY_SUFFIX_NOTE),
                Some(ValidSuffixes::military()),
            ),
            PlateError::UnmappedMilitarySuffix(s) => (
                format!("Unknown military suffix mapping: {s}"),
                Some(UNMAPPED_SUFFIX_NOTE),
                None,
            ),
            PlateError::PlateNotRegistered(_) => ("Plat tidak terdaftar".to_string(), None, None),
            PlateError::ExternalServiceError { timed_out: true, .. } => {
                ("Service temporarily unavailable".to_string(), None, None)
            }
            PlateError::ExternalServiceError { .. } => ("Service error".to_string(), None, None),
            PlateError::Unrecognized => (
                "Format plat nomor tidak valid atau tidak didukung".to_string(),
                None,
                None,
            ),
        };
        ErrorBody {
            error,
            note,
            valid_suffixes,
        }
    }
}
