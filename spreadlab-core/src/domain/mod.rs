//! Domain types for SpreadLab

pub mod instrument;
pub mod interval;
pub mod point;

pub use instrument::{Group, Instrument};
pub use interval::DateInterval;
pub use point::{Point, Series, SeriesMap};
