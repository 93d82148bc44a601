use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

use crate::error::{ErrorBody, PlateError};

/// Which grammar a plate matched, with the fields extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlateClassification {
    /// Letters, digits, letters (e.g. `B1234ABC`).
    Standard {
        region_code: String,
        serial: u64,
        suffix: String,
    },
    /// Legacy military format (e.g. `12345-00`, `1234-V`).
    OldMilitary {
        vehicle_number: String,
        suffix_code: String,
        suffix_kind: SuffixKind,
    },
    StateAgency,
    Diplomatic,
    Unrecognized,
}

impl PlateClassification {
    /// Short stable tag, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            PlateClassification::Standard { .. } => "standard",
            PlateClassification::OldMilitary { .. } => "old_military",
            PlateClassification::StateAgency => "state_agency",
            PlateClassification::Diplomatic => "diplomatic",
            PlateClassification::Unrecognized => "unrecognized",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixKind {
    Numeric,
    Roman,
}

impl SuffixKind {
    pub fn label(&self) -> &'static str {
        match self {
            SuffixKind::Numeric => "Numerik",
            SuffixKind::Roman => "Angka Romawi",
        }
    }
}

impl std::fmt::Display for SuffixKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for SuffixKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Vehicle category derived from the serial of a standard plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    PassengerCar,
    Motorcycle,
    Bus,
    Goods,
    Special,
    Military,
    Unknown,
}

impl VehicleType {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::PassengerCar => "Mobil Penumpang",
            VehicleType::Motorcycle => "Sepeda Motor",
            VehicleType::Bus => "Mobil Bus",
            VehicleType::Goods => "Mobil Barang",
            VehicleType::Special => "Kendaraan Khusus",
            VehicleType::Military => "Kendaraan Militer",
            VehicleType::Unknown => "Tidak Diketahui",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for VehicleType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Plate category (`jenis_plat_nomor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateType {
    Civilian,
    Service,
    StateAgency,
    Diplomatic,
}

impl PlateType {
    pub fn label(&self) -> &'static str {
        match self {
            PlateType::Civilian => "Sipil",
            PlateType::Service => "Dinas TNI dan POLRI",
            PlateType::StateAgency => "Dinas Pemerintah",
            PlateType::Diplomatic => "Diplomatik",
        }
    }
}

impl std::fmt::Display for PlateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for PlateType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Region metadata returned by the registration database. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct RegionInfo {
    pub province: String,
    pub city: String,
    pub samsat_office: String,
    pub address: String,
}

// Report shapes. Field declaration order is the serialized order.

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PlateAnalysis {
    pub kode_wilayah: String,
    pub nomor_identitas_polisi: u64,
    pub kode_khusus: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StandardReport {
    pub status: &'static str,
    pub jenis_kendaraan: VehicleType,
    pub jenis_plat_nomor: PlateType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<&'static str>,
    pub plate_analysis: PlateAnalysis,
    pub plate_region: RegionInfo,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MilitaryAnalysis {
    pub nomor_kendaraan: String,
    pub kode_institusi: String,
    pub tipe_suffix: SuffixKind,
    pub institution_code: &'static str,
    pub digit_count: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MilitaryReport {
    pub status: &'static str,
    pub original_plate: String,
    pub jenis_kendaraan: VehicleType,
    pub jenis_plat_nomor: PlateType,
    pub institution: &'static str,
    pub military_analysis: MilitaryAnalysis,
}

/// Recognized category the registration database cannot answer for.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct UnsupportedReport {
    pub message: &'static str,
    pub jenis_plat_nomor: PlateType,
    pub note: &'static str,
}

/// Successful or informational result of a lookup.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum LookupOutcome {
    Registered(StandardReport),
    OldMilitary(MilitaryReport),
    Unsupported(UnsupportedReport),
}

pub type LookupResult = Result<LookupOutcome, PlateError>;

/// One checked input together with its result.
#[derive(Debug, Clone)]
pub struct PlateReport {
    pub plate: String,
    pub result: LookupResult,
}

impl PlateReport {
    pub fn new(plate: impl Into<String>, result: LookupResult) -> Self {
        Self {
            plate: plate.into(),
            result,
        }
    }

    /// HTTP-equivalent status for this result.
    pub fn status_code(&self) -> u16 {
        match &self.result {
            Ok(_) => 200,
            Err(e) => e.status_code(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }
}

impl Serialize for PlateReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        #[serde(untagged)]
        enum Body<'a> {
            Outcome(&'a LookupOutcome),
            Error(ErrorBody),
        }

        #[derive(serde::Serialize)]
        struct Row<'a> {
            plate: &'a str,
            status_code: u16,
            result: Body<'a>,
        }

        let result = match &self.result {
            Ok(outcome) => Body::Outcome(outcome),
            Err(e) => Body::Error(e.body()),
        };
        Row {
            plate: &self.plate,
            status_code: self.status_code(),
            result,
        }
        .serialize(serializer)
    }
}
