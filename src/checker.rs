use futures::future::join_all;
use indicatif::ProgressBar;

use crate::models::{LookupOutcome, PlateReport};
use crate::plate::classifier::classify;
use crate::plate::enricher::enrich;
use crate::registry::RegionLookup;

/// Runs normalize → classify → enrich for each input and logs the stage outcomes.
///
/// The pipeline itself is stateless; the checker only owns the region lookup.
pub struct PlateChecker<L> {
    lookup: L,
}

impl<L: RegionLookup> PlateChecker<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub async fn check_plate(&self, raw: &str) -> PlateReport {
        let classification = match classify(raw) {
            Ok(c) => c,
            Err(e) => {
                tracing::info!(plate = raw, error = %e, "plate rejected");
                return PlateReport::new(raw, Err(e));
            }
        };
        tracing::info!(plate = raw, kind = classification.kind(), "classified");

        let result = enrich(classification, &self.lookup).await;
        match &result {
            Ok(outcome) => {
                tracing::debug!(plate = raw, outcome = outcome_kind(outcome), "lookup outcome")
            }
            Err(e) if e.status_code() >= 500 => {
                tracing::warn!(plate = raw, error = %e, status = e.status_code(), "lookup outcome")
            }
            Err(e) => {
                tracing::info!(plate = raw, error = %e, status = e.status_code(), "lookup outcome")
            }
        }

        PlateReport::new(raw, result)
    }

    /// Check many plates, `batch_size` at a time. Reports keep input order.
    pub async fn check_batch(
        &self,
        plates: &[String],
        batch_size: usize,
        progress: Option<&ProgressBar>,
    ) -> Vec<PlateReport> {
        let mut reports = Vec::with_capacity(plates.len());

        for batch in plates.chunks(batch_size.max(1)) {
            let results = join_all(batch.iter().map(|plate| self.check_plate(plate))).await;
            if let Some(pb) = progress {
                pb.inc(results.len() as u64);
            }
            reports.extend(results);
        }

        reports
    }
}

fn outcome_kind(outcome: &LookupOutcome) -> &'static str {
    match outcome {
        LookupOutcome::Registered(_) => "registered",
        LookupOutcome::OldMilitary(_) => "old_military",
        LookupOutcome::Unsupported(_) => "unsupported",
    }
}
