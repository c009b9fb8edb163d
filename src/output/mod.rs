mod format;
mod plan;

pub(crate) use plan::{plan_json, print_plan_table};
