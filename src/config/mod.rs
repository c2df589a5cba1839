//! Conversion options and their JSON form.

/// [`Options`](options::Options) and [`ColorMode`](options::ColorMode).
pub mod options;
