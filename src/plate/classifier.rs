use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MilitaryDefect, PlateError};
use crate::models::{PlateClassification, SuffixKind};
use crate::plate::normalizer::{normalize, NormalizedPlate};
use crate::plate::tables::{is_numeric_suffix, is_roman_suffix};

/// Anything shaped like `digits-suffix`; the strict grammar is checked after.
static MILITARY_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-(\d+|[IVX]+)$").expect("military regex is valid"));

static STANDARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+)(\d+)([A-Z]+)$").expect("standard regex is valid"));

static STATE_AGENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^RI\d*$").expect("state agency regex is valid"));

static DIPLOMATIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(CC|CD|CN|CS)\d*$").expect("diplomatic regex is valid"));

/// Classify a raw plate string.
///
/// The order of the checks is part of the contract; first match wins:
/// 1. old military (`12345-00`, `1234-V`) on the hyphenated form
/// 2. standard (`B1234ABC`) on the compact form
/// 3. state agency (`RI…`), then diplomatic (`CC|CD|CN|CS…`)
/// 4. otherwise [`PlateClassification::Unrecognized`]
///
/// Returns `Err` only for unusable input and for military-shaped plates
/// that fail the strict military grammar.
pub fn classify(raw: &str) -> Result<PlateClassification, PlateError> {
    let plate = normalize(raw)?;
    classify_normalized(&plate)
}

pub fn classify_normalized(plate: &NormalizedPlate) -> Result<PlateClassification, PlateError> {
    if let Some(military) = classify_old_military(&plate.hyphenated) {
        return military;
    }

    if let Some(caps) = STANDARD.captures(&plate.compact) {
        let serial = caps[2]
            .parse::<u64>()
            .map_err(|_| PlateError::InvalidInput(format!("Serial too large: {}", &caps[2])))?;
        return Ok(PlateClassification::Standard {
            region_code: caps[1].to_string(),
            serial,
            suffix: caps[3].to_string(),
        });
    }

    Ok(classify_non_standard(&plate.compact))
}

fn classify_old_military(hyphenated: &str) -> Option<Result<PlateClassification, PlateError>> {
    let caps = MILITARY_SHAPE.captures(hyphenated)?;
    let number = &caps[1];
    let suffix = &caps[2];

    if !(4..=5).contains(&number.len()) {
        return Some(Err(PlateError::MalformedMilitaryPlate(
            MilitaryDefect::VehicleNumber(number.to_string()),
        )));
    }

    let suffix_kind = if is_numeric_suffix(suffix) {
        SuffixKind::Numeric
    } else if is_roman_suffix(suffix) {
        SuffixKind::Roman
    } else {
        return Some(Err(PlateError::MalformedMilitaryPlate(MilitaryDefect::Suffix(
            suffix.to_string(),
        ))));
    };

    Some(Ok(PlateClassification::OldMilitary {
        vehicle_number: number.to_string(),
        suffix_code: suffix.to_string(),
        suffix_kind,
    }))
}

fn classify_non_standard(compact: &str) -> PlateClassification {
    if STATE_AGENCY.is_match(compact) {
        PlateClassification::StateAgency
    } else if DIPLOMATIC.is_match(compact) {
        PlateClassification::Diplomatic
    } else {
        PlateClassification::Unrecognized
    }
}
