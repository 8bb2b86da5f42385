//! power-mix-chart: normalization and interactive charting of European
//! electricity production/consumption tables.
//!
//! Raw table text (long monthly balance layout or wide annual layout) is
//! ingested into a `CanonicalDataset`; a `ChartController` ranks the default
//! view, applies user selection changes, and renders multi-series time charts
//! through a backend-agnostic `Renderer`, resolving pointer motion to the
//! nearest sample for tooltips.

pub mod api;
pub mod core;
pub mod error;
pub mod ingest;
pub mod interaction;
pub mod render;
pub mod selection;
pub mod series;
pub mod telemetry;

pub use api::{ChartController, PipelineConfig};
pub use error::{ChartError, ChartResult};
