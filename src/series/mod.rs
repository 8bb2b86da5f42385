//! Domain/scale calculation and series rendering.

pub mod color;
mod frame;
mod renderer;
mod style;

pub use color::{ColorAssignment, TABLEAU_10};
pub use frame::{ChartFrame, FrameOptions, FrameSeries, SeriesKind, SeriesPoint, YPadding};
pub use renderer::{ChartGeometry, DrawnSeries, RenderedChart, SeriesRenderer};
pub use style::{LayoutConfig, StyleConfig};
