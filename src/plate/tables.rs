use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::models::{PlateType, VehicleType};

/// Institution codes that may appear as the suffix of a standard plate.
pub const INSTITUTIONS: [(&str, &str); 6] = [
    ("ZZT", "Markas Besar TNI"),
    ("ZZU", "TNI AU"),
    ("ZZD", "TNI AD"),
    ("ZZL", "TNI AL"),
    ("ZZP", "POLRI"),
    ("ZZH", "Kementrian / Lembaga Negara"),
];

/// Roman-numeral suffixes accepted on old military plates.
pub const ROMAN_SUFFIXES: [&str; 9] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];

static TABLES: LazyLock<PlateTables> = LazyLock::new(PlateTables::build);

/// Shared, read-only lookup tables.
pub fn tables() -> &'static PlateTables {
    &TABLES
}

/// Immutable lookup tables, built once.
#[derive(Debug)]
pub struct PlateTables {
    institutions: BTreeMap<&'static str, &'static str>,
    military_suffixes: BTreeMap<String, &'static str>,
}

impl PlateTables {
    pub fn build() -> Self {
        let institutions = INSTITUTIONS.into_iter().collect();

        let mut military_suffixes = BTreeMap::new();
        for n in 0..=99u8 {
            military_suffixes.insert(format!("{n:02}"), institution_for_numeric_suffix(n));
        }
        // Roman numerals are traditionally Army.
        for roman in ROMAN_SUFFIXES {
            military_suffixes.insert(roman.to_string(), "ZZD");
        }

        Self {
            institutions,
            military_suffixes,
        }
    }

    pub fn institution_name(&self, code: &str) -> Option<&'static str> {
        self.institutions.get(code).copied()
    }

    pub fn is_institution_code(&self, code: &str) -> bool {
        self.institutions.contains_key(code)
    }

    /// Institution code for an old-military suffix token (`"00"`..`"99"`, `I`..`IX`).
    pub fn military_institution(&self, suffix: &str) -> Option<&'static str> {
        self.military_suffixes.get(suffix).copied()
    }

    pub fn institutions(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.institutions.iter().map(|(k, v)| (*k, *v))
    }

    pub fn military_suffixes(&self) -> impl Iterator<Item = (&str, &'static str)> + '_ {
        self.military_suffixes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Plate category for a standard plate's suffix.
    pub fn plate_type(&self, suffix: &str) -> PlateType {
        if self.is_institution_code(suffix) {
            PlateType::Service
        } else {
            PlateType::Civilian
        }
    }
}

/// Range rule for two-digit military suffixes.
fn institution_for_numeric_suffix(n: u8) -> &'static str {
    match n {
        0 => "ZZT",
        1..=5 => "ZZD",
        6..=8 => "ZZL",
        9..=11 => "ZZU",
        12..=15 => "ZZP",
        _ => "ZZD",
    }
}

/// Vehicle category from a standard plate's serial number.
pub fn vehicle_type(serial: u64) -> VehicleType {
    match serial {
        1..=1999 => VehicleType::PassengerCar,
        2000..=6999 => VehicleType::Motorcycle,
        7000..=7999 => VehicleType::Bus,
        8000..=8999 => VehicleType::Goods,
        9000..=9999 => VehicleType::Special,
        _ => VehicleType::Unknown,
    }
}

pub fn is_numeric_suffix(s: &str) -> bool {
    s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_roman_suffix(s: &str) -> bool {
    ROMAN_SUFFIXES.contains(&s)
}
