use colored::*;
use folio::create::gather_new_record;
use folio::{CalendarDate, Collection, InputProvider, NewRecordArgs};

use crate::error::CliResult;

/// Print soft warnings to stderr so they show even with logging turned down
pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }
}

/// Create a record from flags, prompting for the rest
pub fn run_new_command(
    collection: &Collection,
    input: &dyn InputProvider,
    args: NewRecordArgs,
) -> CliResult<()> {
    let request = gather_new_record(input, &args, CalendarDate::today())?;
    tracing::debug!("Creating record {:?}", request);

    let created = collection.create(&request)?;
    print_warnings(&created.warnings);

    let dir = collection.layout().relative_path(&created.dir);
    println!("{} {}", "Record created:".green(), dir);
    tracing::debug!("Wrote {}", created.path.display());
    Ok(())
}
