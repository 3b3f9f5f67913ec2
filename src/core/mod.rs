pub mod aligned_frame;
pub mod line_series;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod time_scale;
pub mod transform;
pub mod types;
pub mod value_scale;

pub use aligned_frame::AlignedFrame;
pub use line_series::{LineSegment, contiguous_runs, project_line_segments};
pub use scale::LinearScale;
pub use series::{Observation, Series};
pub use time_scale::{TimeScale, TimeScaleTuning};
pub use transform::{TransformMode, YEAR_OVER_YEAR_LAG, transform, year_over_year_change};
pub use types::{DataPoint, Rect, Viewport};
pub use value_scale::{ScaleMode, ValueScale, ValueScaleTuning};
