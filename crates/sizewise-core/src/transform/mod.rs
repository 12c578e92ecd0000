//! Pixel operations that execute a resolved geometry.
//!
//! # Operation Order
//!
//! 1. Resample to the intermediate size
//! 2. Extract the crop rectangle
//! 3. Embed on a padded canvas
//!
//! # Coordinate System
//!
//! - All coordinates are whole pixels
//! - Origin is top-left corner

mod apply;
mod crop;
mod resample;

pub use apply::apply_geometry;
pub use crop::{embed, extract_area};
pub use resample::resample;
