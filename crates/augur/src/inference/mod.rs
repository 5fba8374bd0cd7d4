//! Column cleaning and the cascading type-detector chain.

mod clean;
mod detect;
mod patterns;

pub use clean::{clean_column, NULL_TOKENS};
pub use detect::{
    categorical_fallback, detect_boolean, detect_complex, detect_datetime, detect_numeric,
    detect_timedelta, parse_complex, parse_datetime, parse_timedelta, run_chain,
};
