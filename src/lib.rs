pub mod line_insight;

pub use line_insight::*;
