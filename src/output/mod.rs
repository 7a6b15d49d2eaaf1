pub mod formatter;

pub use formatter::{
    format_age, format_breakdown, format_record_detail, format_record_table, format_severity,
    format_tsv, should_use_colors,
};
