pub mod money;

pub use money::{line_total, parse_decimal, parse_optional_decimal, round_half_up};
