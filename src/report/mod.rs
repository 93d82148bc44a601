//! Report renderers for plate lookup results.
//!
//! - [`terminal`] — colored summary box plus result and error tables; respects `--quiet`.
//!
//! JSON output is the serialized [`PlateReport`](crate::models::PlateReport) list.

pub mod terminal;
