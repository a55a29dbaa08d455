pub mod format;
pub mod geo_utils;
