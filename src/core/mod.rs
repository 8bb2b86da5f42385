pub mod format;
pub mod observation;
pub mod scale;
pub mod temporal;
pub mod ticks;
pub mod types;

pub use format::{ValueFormat, decimals_for_step, group_thousands};
pub use observation::{CanonicalDataset, CanonicalObservation, ObservationFilter, Role};
pub use scale::LinearScale;
pub use temporal::{DateGranularity, TemporalPoint};
pub use ticks::{nice_step, nice_ticks, nice_upper_bound, temporal_ticks};
pub use types::{Margins, PlotArea, Viewport};
