use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{LookupOutcome, PlateReport};
use crate::plate::tables::{tables, ROMAN_SUFFIXES};

/// Per-outcome counts for the summary box.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    registered: usize,
    military: usize,
    unsupported: usize,
    errors: usize,
}

impl Summary {
    fn of(reports: &[PlateReport]) -> Self {
        let mut s = Summary::default();
        for report in reports {
            match &report.result {
                Ok(LookupOutcome::Registered(_)) => s.registered += 1,
                Ok(LookupOutcome::OldMilitary(_)) => s.military += 1,
                Ok(LookupOutcome::Unsupported(_)) => s.unsupported += 1,
                Err(_) => s.errors += 1,
            }
        }
        s
    }
}

/// Render a colored terminal report.
pub fn render(reports: &[PlateReport], quiet: bool) -> Result<()> {
    let total = reports.len();
    let summary = Summary::of(reports);

    if quiet {
        println!(
            "Total: {}  Registered: {}  Military: {}  Unsupported: {}  Error: {}",
            total,
            summary.registered.to_string().green(),
            summary.military.to_string().green(),
            summary.unsupported.to_string().yellow(),
            summary.errors.to_string().red(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}\n",
        "plate-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Plates checked  : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  Registered   : {:>4}", "✓".green(), summary.registered)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Old military : {:>4}", "✓".green(), summary.military)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Unsupported  : {:>4}", "⚠".yellow(), summary.unsupported)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Error        : {:>4}", "✗".red(), summary.errors)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if summary.errors > 0 {
        println!(" {} Plates that could not be resolved:\n", "[ERROR]".red().bold());
        render_error_table(reports);
        println!();
    }

    if summary.registered + summary.military + summary.unsupported > 0 {
        println!(" {} Resolved plates:\n", "[OK]".green().bold());
        render_outcome_table(reports);
        println!();
    }

    Ok(())
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
        .collect()
}

fn render_outcome_table(reports: &[PlateReport]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&[
            "Plate",
            "Format",
            "Vehicle",
            "Plate type",
            "Institution",
            "Region",
        ]));

    for report in reports {
        let Ok(outcome) = &report.result else { continue };

        let row = match outcome {
            LookupOutcome::Registered(r) => vec![
                Cell::new(&report.plate),
                Cell::new("standard").fg(Color::Green),
                Cell::new(r.jenis_kendaraan.to_string()),
                Cell::new(r.jenis_plat_nomor.to_string()),
                Cell::new(r.institution.unwrap_or("-")),
                Cell::new(region_line(
                    &r.plate_region.city,
                    &r.plate_region.province,
                    &r.plate_region.samsat_office,
                )),
            ],
            LookupOutcome::OldMilitary(r) => vec![
                Cell::new(&report.plate),
                Cell::new(format!("old military ({})", r.military_analysis.tipe_suffix))
                    .fg(Color::Green),
                Cell::new(r.jenis_kendaraan.to_string()),
                Cell::new(r.jenis_plat_nomor.to_string()),
                Cell::new(format!(
                    "{} ({})",
                    r.institution, r.military_analysis.institution_code
                )),
                Cell::new("-"),
            ],
            LookupOutcome::Unsupported(r) => vec![
                Cell::new(&report.plate),
                Cell::new("unsupported").fg(Color::Yellow),
                Cell::new("-"),
                Cell::new(r.jenis_plat_nomor.to_string()),
                Cell::new("-"),
                Cell::new(r.message).fg(Color::DarkGrey),
            ],
        };
        table.add_row(row);
    }

    println!("{}", table);
}

fn render_error_table(reports: &[PlateReport]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&["Plate", "Status", "Error", "Note"]));

    for report in reports {
        let Err(e) = &report.result else { continue };
        let body = e.body();
        let status_color = if report.status_code() >= 500 {
            Color::Magenta
        } else {
            Color::Red
        };

        table.add_row(vec![
            Cell::new(&report.plate),
            Cell::new(report.status_code())
                .fg(status_color)
                .set_alignment(CellAlignment::Center),
            Cell::new(body.error),
            Cell::new(body.note.unwrap_or("")).fg(Color::DarkGrey),
        ]);
    }

    println!("{}", table);
}

fn region_line(city: &str, province: &str, office: &str) -> String {
    let place: Vec<&str> = [city, province]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    match (place.is_empty(), office.is_empty()) {
        (true, true) => "-".to_string(),
        (false, true) => place.join(", "),
        (true, false) => office.to_string(),
        (false, false) => format!("{} — {}", place.join(", "), office),
    }
}

/// Print the supported formats, institution codes and military suffix mapping.
pub fn render_formats() {
    println!("\n {}\n", "Supported plate formats".bold());
    println!("   standard      XX-XXXX-XXX   e.g. B-1234-ABC, D-5678-ZZP");
    println!("   old military  XXXXX-XX      e.g. 12345-00, 1234-V");
    println!("   state agency  RI…           recognized, not in the database");
    println!("   diplomatic    CC/CD/CN/CS…  recognized, not in the database\n");

    println!(" {}\n", "Vehicle type by serial".bold());
    println!("   1-1999 Mobil Penumpang · 2000-6999 Sepeda Motor · 7000-7999 Mobil Bus");
    println!("   8000-8999 Mobil Barang · 9000-9999 Kendaraan Khusus\n");

    let t = tables();

    let mut institutions = Table::new();
    institutions
        .load_preset(UTF8_FULL)
        .set_header(header(&["Code", "Institution", "Old military suffixes"]));
    for (code, name) in t.institutions() {
        institutions.add_row(vec![
            Cell::new(code),
            Cell::new(name),
            Cell::new(suffixes_for(code)),
        ]);
    }
    println!("{}", institutions);
}

/// Compact list of the old-military suffixes mapped to `code`, e.g. `01-05, 16-99, I-IX`.
fn suffixes_for(code: &str) -> String {
    let numeric: Vec<u8> = (0..=99u8)
        .filter(|n| tables().military_institution(&format!("{n:02}")) == Some(code))
        .collect();

    let mut parts: Vec<String> = Vec::new();
    let mut i = 0;
    while i < numeric.len() {
        let start = numeric[i];
        let mut end = start;
        while i + 1 < numeric.len() && numeric[i + 1] == end + 1 {
            i += 1;
            end = numeric[i];
        }
        parts.push(if start == end {
            format!("{start:02}")
        } else {
            format!("{start:02}-{end:02}")
        });
        i += 1;
    }

    let roman_all = ROMAN_SUFFIXES
        .iter()
        .all(|r| tables().military_institution(r) == Some(code));
    if roman_all {
        parts.push("I-IX".to_string());
    }

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlateError;
    use crate::models::{PlateType, UnsupportedReport};

    #[test]
    fn test_summary_counts() {
        let reports = vec![
            PlateReport::new("???", Err(PlateError::Unrecognized)),
            PlateReport::new(
                "RI1",
                Ok(LookupOutcome::Unsupported(UnsupportedReport {
                    message: "m",
                    jenis_plat_nomor: PlateType::StateAgency,
                    note: "n",
                })),
            ),
        ];
        assert_eq!(
            Summary::of(&reports),
            Summary {
                registered: 0,
                military: 0,
                unsupported: 1,
                errors: 1
            }
        );
    }

    #[test]
    fn test_suffixes_for() {
        assert_eq!(suffixes_for("ZZT"), "00");
        assert_eq!(suffixes_for("ZZD"), "01-05, 16-99, I-IX");
        assert_eq!(suffixes_for("ZZL"), "06-08");
        assert_eq!(suffixes_for("ZZU"), "09-11");
        assert_eq!(suffixes_for("ZZP"), "12-15");
        assert_eq!(suffixes_for("ZZH"), "-");
    }

    #[test]
    fn test_region_line() {
        assert_eq!(region_line("", "", ""), "-");
        assert_eq!(region_line("Bandung", "Jawa Barat", ""), "Bandung, Jawa Barat");
        assert_eq!(
            region_line("Bandung", "", "Samsat Bandung Timur"),
            "Bandung — Samsat Bandung Timur"
        );
    }
}
