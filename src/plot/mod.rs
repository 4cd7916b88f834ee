//! Terminal plotting.

pub mod ascii;

pub use ascii::render_percent_plot;
