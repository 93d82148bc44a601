use crate::error::PlateError;
use crate::models::{
    LookupOutcome, LookupResult, MilitaryAnalysis, MilitaryReport, PlateAnalysis,
    PlateClassification, PlateType, StandardReport, SuffixKind, UnsupportedReport, VehicleType,
};
use crate::plate::tables::{tables, vehicle_type};
use crate::registry::RegionLookup;

const STATUS_REGISTERED: &str = "Plat sudah terdaftar";
const STATUS_OLD_MILITARY: &str = "Format plat militer lama terdeteksi";
const STANDARD_ONLY_NOTE: &str = "Database hanya mendukung format plat standar (XX-XXXX-XXX)";

/// Turn a classification into the final result.
///
/// Only standard plates reach `lookup`; every other branch is answered from
/// the static tables.
pub async fn enrich<L: RegionLookup>(
    classification: PlateClassification,
    lookup: &L,
) -> LookupResult {
    match classification {
        PlateClassification::Standard {
            region_code,
            serial,
            suffix,
        } => enrich_standard(region_code, serial, suffix, lookup).await,
        PlateClassification::OldMilitary {
            vehicle_number,
            suffix_code,
            suffix_kind,
        } => enrich_old_military(vehicle_number, suffix_code, suffix_kind),
        PlateClassification::StateAgency => Ok(LookupOutcome::Unsupported(UnsupportedReport {
            message: "Format plat dinas negara tidak didukung oleh database",
            jenis_plat_nomor: PlateType::StateAgency,
            note: STANDARD_ONLY_NOTE,
        })),
        PlateClassification::Diplomatic => Ok(LookupOutcome::Unsupported(UnsupportedReport {
            message: "Format plat diplomatik tidak didukung oleh database",
            jenis_plat_nomor: PlateType::Diplomatic,
            note: STANDARD_ONLY_NOTE,
        })),
        PlateClassification::Unrecognized => Err(PlateError::Unrecognized),
    }
}

async fn enrich_standard<L: RegionLookup>(
    region_code: String,
    serial: u64,
    suffix: String,
    lookup: &L,
) -> LookupResult {
    let Some(suffix_letter) = suffix.chars().next_back() else {
        return Err(PlateError::Unrecognized);
    };

    let region = lookup
        .lookup(&region_code, suffix_letter)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                PlateError::PlateNotRegistered(format!("{region_code}{serial}{suffix}"))
            } else {
                PlateError::ExternalServiceError {
                    timed_out: e.is_timeout(),
                    reason: e.to_string(),
                }
            }
        })?;

    let t = tables();
    Ok(LookupOutcome::Registered(StandardReport {
        status: STATUS_REGISTERED,
        jenis_kendaraan: vehicle_type(serial),
        jenis_plat_nomor: t.plate_type(&suffix),
        institution: t.institution_name(&suffix),
        plate_analysis: PlateAnalysis {
            kode_wilayah: region_code,
            nomor_identitas_polisi: serial,
            kode_khusus: suffix,
        },
        plate_region: region,
    }))
}

fn enrich_old_military(
    vehicle_number: String,
    suffix_code: String,
    suffix_kind: SuffixKind,
) -> LookupResult {
    let t = tables();
    let (institution_code, institution) = t
        .military_institution(&suffix_code)
        .and_then(|code| t.institution_name(code).map(|name| (code, name)))
        .ok_or_else(|| PlateError::UnmappedMilitarySuffix(suffix_code.clone()))?;

    Ok(LookupOutcome::OldMilitary(MilitaryReport {
        status: STATUS_OLD_MILITARY,
        original_plate: format!("{vehicle_number}-{suffix_code}"),
        jenis_kendaraan: VehicleType::Military,
        jenis_plat_nomor: PlateType::Service,
        institution,
        military_analysis: MilitaryAnalysis {
            digit_count: vehicle_number.len(),
            nomor_kendaraan: vehicle_number,
            kode_institusi: suffix_code,
            tipe_suffix: suffix_kind,
            institution_code,
        },
    }))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::RegionInfo;
    use crate::registry::LookupError;
    use crate::plate::classifier::classify;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// What the stub answers with.
    #[derive(Debug, Clone, Copy)]
    pub(crate) enum StubAnswer {
        Found,
        NotFound,
        ServiceError,
        Timeout,
    }

    /// Call-counting [`RegionLookup`] that records the keys it was asked for.
    pub(crate) struct StubLookup {
        answer: StubAnswer,
        pub(crate) calls: AtomicUsize,
        pub(crate) keys: Mutex<Vec<(String, char)>>,
    }

    impl StubLookup {
        pub(crate) fn new(answer: StubAnswer) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
                keys: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RegionLookup for StubLookup {
        async fn lookup(
            &self,
            region_code: &str,
            suffix_letter: char,
        ) -> Result<RegionInfo, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.keys
                .lock()
                .unwrap()
                .push((region_code.to_string(), suffix_letter));
            match self.answer {
                StubAnswer::Found => Ok(RegionInfo {
                    province: "DKI Jakarta".to_string(),
                    city: "Jakarta Barat".to_string(),
                    samsat_office: "Samsat Jakarta Barat".to_string(),
                    address: "Jl. Daan Mogot Km. 13".to_string(),
                }),
                StubAnswer::NotFound => Err(LookupError::NotFound {
                    region_code: region_code.to_string(),
                    suffix_letter,
                }),
                StubAnswer::ServiceError => Err(LookupError::Status(500)),
                StubAnswer::Timeout => Err(LookupError::Timeout),
            }
        }
    }

    async fn run(raw: &str, stub: &StubLookup) -> LookupResult {
        enrich(classify(raw).unwrap(), stub).await
    }

    #[tokio::test]
    async fn test_standard_civilian() {
        let stub = StubLookup::new(StubAnswer::Found);
        let outcome = run("B1234ABC", &stub).await.unwrap();
        let LookupOutcome::Registered(report) = outcome else {
            panic!("expected registered outcome");
        };
        assert_eq!(report.status, STATUS_REGISTERED);
        assert_eq!(report.jenis_kendaraan, VehicleType::PassengerCar);
        assert_eq!(report.jenis_plat_nomor, PlateType::Civilian);
        assert_eq!(report.institution, None);
        assert_eq!(report.plate_analysis.kode_wilayah, "B");
        assert_eq!(report.plate_analysis.nomor_identitas_polisi, 1234);
        assert_eq!(report.plate_analysis.kode_khusus, "ABC");
        assert_eq!(report.plate_region.city, "Jakarta Barat");
        assert_eq!(stub.keys.lock().unwrap().as_slice(), &[("B".to_string(), 'C')]);
    }

    #[tokio::test]
    async fn test_standard_institution() {
        let stub = StubLookup::new(StubAnswer::Found);
        let LookupOutcome::Registered(report) = run("D5678ZZP", &stub).await.unwrap() else {
            panic!("expected registered outcome");
        };
        assert_eq!(report.jenis_plat_nomor, PlateType::Service);
        assert_eq!(report.institution, Some("POLRI"));
        assert_eq!(report.jenis_kendaraan, VehicleType::Motorcycle);
        assert_eq!(stub.keys.lock().unwrap()[0], ("D".to_string(), 'P'));
    }

    #[tokio::test]
    async fn test_not_found_and_service_error_stay_distinct() {
        let missing = StubLookup::new(StubAnswer::NotFound);
        assert_eq!(
            run("B1234ABC", &missing).await,
            Err(PlateError::PlateNotRegistered("B1234ABC".to_string()))
        );

        let broken = StubLookup::new(StubAnswer::ServiceError);
        let err = run("B1234ABC", &broken).await.unwrap_err();
        assert!(matches!(
            err,
            PlateError::ExternalServiceError {
                timed_out: false,
                ..
            }
        ));
        assert_eq!(err.status_code(), 502);

        let slow = StubLookup::new(StubAnswer::Timeout);
        assert!(matches!(
            run("B1234ABC", &slow).await,
            Err(PlateError::ExternalServiceError { timed_out: true, .. })
        ));
    }

    #[tokio::test]
    async fn test_old_military_headquarters() {
        let stub = StubLookup::new(StubAnswer::Found);
        let LookupOutcome::OldMilitary(report) = run("12345-00", &stub).await.unwrap() else {
            panic!("expected military outcome");
        };
        assert_eq!(report.status, STATUS_OLD_MILITARY);
        assert_eq!(report.original_plate, "12345-00");
        assert_eq!(report.jenis_kendaraan, VehicleType::Military);
        assert_eq!(report.jenis_plat_nomor, PlateType::Service);
        assert_eq!(report.institution, "Markas Besar TNI");
        assert_eq!(report.military_analysis.institution_code, "ZZT");
        assert_eq!(report.military_analysis.digit_count, 5);
        assert_eq!(report.military_analysis.tipe_suffix, SuffixKind::Numeric);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_old_military_roman() {
        let stub = StubLookup::new(StubAnswer::Found);
        let LookupOutcome::OldMilitary(report) = run("1234-V", &stub).await.unwrap() else {
            panic!("expected military outcome");
        };
        assert_eq!(report.institution, "TNI AD");
        assert_eq!(report.military_analysis.institution_code, "ZZD");
        assert_eq!(report.military_analysis.tipe_suffix, SuffixKind::Roman);
        assert_eq!(report.military_analysis.digit_count, 4);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_unmapped_military_suffix() {
        let stub = StubLookup::new(StubAnswer::Found);
        let forged = PlateClassification::OldMilitary {
            vehicle_number: "1234".to_string(),
            suffix_code: "X".to_string(),
            suffix_kind: SuffixKind::Roman,
        };
        assert_eq!(
            enrich(forged, &stub).await,
            Err(PlateError::UnmappedMilitarySuffix("X".to_string()))
        );
    }

    #[tokio::test]
    async fn test_state_agency_and_diplomatic_never_call_out() {
        let stub = StubLookup::new(StubAnswer::Found);

        let LookupOutcome::Unsupported(state) = run("RI1", &stub).await.unwrap() else {
            panic!("expected unsupported outcome");
        };
        assert_eq!(state.jenis_plat_nomor, PlateType::StateAgency);

        let LookupOutcome::Unsupported(diplomatic) = run("CD12", &stub).await.unwrap() else {
            panic!("expected unsupported outcome");
        };
        assert_eq!(diplomatic.jenis_plat_nomor, PlateType::Diplomatic);
        assert_eq!(diplomatic.note, STANDARD_ONLY_NOTE);

        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_unrecognized() {
        let stub = StubLookup::new(StubAnswer::Found);
        assert_eq!(run("ABC", &stub).await, Err(PlateError::Unrecognized));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_military_json_shape() {
        let stub = StubLookup::new(StubAnswer::Found);
        let outcome = run("1234-V", &stub).await.unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["jenis_kendaraan"], "Kendaraan Militer");
        assert_eq!(json["military_analysis"]["tipe_suffix"], "Angka Romawi");
        assert_eq!(json["military_analysis"]["kode_institusi"], "V");
    }
}
