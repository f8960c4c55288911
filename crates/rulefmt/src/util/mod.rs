pub mod format;

pub use format::{format_threshold, parse_number, parse_row, round_threshold, DEFAULT_PRECISION};
