pub mod formatter;

pub use formatter::{
    format_breakdown, format_compact, format_json, format_score_line, should_use_colors,
};
