pub(crate) mod date;
pub(crate) mod log;

pub(crate) use date::{date_tokens, parse_date};
pub(crate) use log::{set_quiet, set_verbose};
