use colored::*;
use folio::edit::gather_record_edit;
use folio::{Collection, InputProvider, RecordEdit};
use std::io::{self, Read};

use crate::error::{CliError, CliResult, IntoCliResult};
use crate::exit_codes::EXIT_FAILURE;
use crate::new::print_warnings;

const MISSING_INPUT: &str = "Provide a record path, folder, or URL to edit.";

/// Everything piped to stdin, or `None` when nothing was piped
fn read_piped_body(interactive: bool) -> CliResult<Option<String>> {
    if interactive {
        return Ok(None);
    }
    let mut body = String::new();
    io::stdin().read_to_string(&mut body).cli_general_error()?;
    Ok(if body.trim().is_empty() { None } else { Some(body) })
}

/// Edit a record's fields and, when stdin is piped, replace its body
pub fn run_edit_command(
    collection: &Collection,
    input: &dyn InputProvider,
    target: String,
    edit: RecordEdit,
) -> CliResult<()> {
    let target = if target.is_empty() {
        input.ask_required("Record path, folder, or URL", "")?
    } else {
        target
    };
    if target.is_empty() {
        return Err(CliError::new(MISSING_INPUT, EXIT_FAILURE));
    }

    let record = collection.open_record(&target)?;
    let mut edit = gather_record_edit(input, &record.fields(), edit)?;
    edit.body = read_piped_body(input.is_interactive())?;

    let outcome = collection.edit(&target, &edit)?;
    print_warnings(&outcome.warnings);

    let path = collection.layout().relative_path(&outcome.path);
    println!("{} {}", "Record updated:".green(), path);
    Ok(())
}
