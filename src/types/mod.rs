pub mod chart;
pub mod indicators;
pub mod levels;
pub mod report;
pub mod signals;
pub mod volume;

pub use chart::*;
pub use indicators::*;
pub use levels::*;
pub use report::*;
pub use signals::*;
pub use volume::*;
