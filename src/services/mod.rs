pub mod build;
pub mod directions;
pub mod kml;
pub mod persistence;
