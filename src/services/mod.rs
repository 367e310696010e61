pub mod levels;
pub mod report;
pub mod series;
pub mod signals;
pub mod volume;

pub use levels::detect_levels;
pub use report::{analyze, analyze_series};
pub use series::prepare_series;
pub use signals::indicators::{compute_indicators, Indicator};
pub use signals::{aggregate_signal, collect_votes, tally};
pub use volume::analyze_volume;
