//! Region lookup against the vehicle registration database.
//!
//! [`RegionLookup`] is the seam the enricher depends on; [`firestore`] is the
//! HTTP implementation used by the CLI. Implementations return
//! `Ok(RegionInfo)` on a hit, [`LookupError::NotFound`] when the database has
//! no record, and any other [`LookupError`] for infrastructure failures.
//! They do not retry.

pub mod firestore;

use std::future::Future;

use crate::models::RegionInfo;

pub trait RegionLookup {
    /// Fetch region metadata for a region code and the last letter of a plate suffix.
    fn lookup(
        &self,
        region_code: &str,
        suffix_letter: char,
    ) -> impl Future<Output = Result<RegionInfo, LookupError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("no region record for {region_code}/{suffix_letter}")]
    NotFound {
        region_code: String,
        suffix_letter: char,
    },

    #[error("region lookup timed out")]
    Timeout,

    #[error("region lookup request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("region service answered with status {0}")]
    Status(u16),

    #[error("unexpected region payload: {0}")]
    Payload(String),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, LookupError::Timeout)
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LookupError::Timeout
        } else if e.is_decode() {
            LookupError::Payload(e.to_string())
        } else {
            LookupError::Http(e)
        }
    }
}
