use comfy_table::Cell;

use crate::fetch::DownloadJob;
use crate::output::format::{create_styled_table, header_cell};

/// Download plan as a table: one row per remote file
pub(crate) fn print_plan_table(jobs: &[DownloadJob], use_color: bool) {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Date", use_color),
        header_cell("Name", use_color),
        header_cell("Source URL", use_color),
        header_cell("Destination", use_color),
    ]);

    for job in jobs {
        table.add_row(vec![
            Cell::new(&job.date),
            Cell::new(&job.name),
            Cell::new(&job.url),
            Cell::new(job.dest.display()),
        ]);
    }

    println!("\n  Download plan ({} files)\n", jobs.len());
    println!("{table}");
}

pub(crate) fn plan_json(jobs: &[DownloadJob]) -> String {
    serde_json::to_string_pretty(jobs).unwrap_or_else(|_| "[]".to_string())
}
