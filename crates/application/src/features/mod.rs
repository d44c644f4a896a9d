//! Page features.
//!
//! Each feature is an apply/revert pair over a [`Document`](crate::ports::Document).
//! Apply is idempotent; revert restores exactly what apply changed and
//! releases the snapshot it kept.

mod bionic_reader;
mod dyslexia_styler;
mod reading_ruler;
mod vision_filter;

pub use bionic_reader::{BLOCK_TAGS, BionicReader, PROCESSED_ATTR};
pub use dyslexia_styler::DyslexiaStyler;
pub use reading_ruler::{DEFAULT_RULER_HEIGHT_PX, RULER_ATTR, ReadingRuler};
pub use vision_filter::{FILTER_ATTR, FilterTarget, VisionFilter};
