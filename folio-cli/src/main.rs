use clap::CommandFactory;
use folio::{Collection, NewRecordArgs, RecordEdit};
use folio_cli::cli::{join_words, Cli, Commands};
use folio_cli::error::{handle_cli_result, CliResult, IntoCliResult};
use folio_cli::exit_codes::{EXIT_FAILURE, EXIT_SUCCESS};
use folio_cli::{completions, domain, edit, find, logging, new, prompt};
use std::process;

fn main() {
    let cli = Cli::parse_args();

    // Fast path for help
    let Some(command) = cli.command.as_ref() else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Error: {}", e);
            process::exit(EXIT_FAILURE);
        }
        process::exit(EXIT_SUCCESS);
    };

    let use_color = Cli::should_use_color();
    if !use_color {
        colored::control::set_override(false);
    }
    logging::init(
        logging::log_level(cli.quiet, cli.debug, cli.verbose),
        use_color,
    );

    let exit_code = match command {
        Commands::Completion { shell } => {
            tracing::debug!("Generating completion for {:?}", shell);
            match completions::print_completion(*shell) {
                Ok(()) => EXIT_SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    EXIT_FAILURE
                }
            }
        }
        command => handle_cli_result(run_command(&cli, command)),
    };

    process::exit(exit_code);
}

fn open_collection(cli: &Cli) -> CliResult<Collection> {
    let root = cli.project_root().cli_general_error()?;
    tracing::debug!("Project root: {}", root.display());
    Ok(Collection::open(root)?)
}

fn run_command(cli: &Cli, command: &Commands) -> CliResult<()> {
    let collection = open_collection(cli)?;
    let input = prompt::input_provider();

    match command {
        Commands::New {
            date,
            title,
            slug,
            status,
            summary,
            series,
            tags,
        } => {
            tracing::debug!("Running new command");
            let args = NewRecordArgs {
                date: date.clone(),
                title: title.clone(),
                slug: slug.clone(),
                status: status.clone(),
                summary: summary.clone(),
                series: series.clone(),
                tags: tags.clone(),
            };
            new::run_new_command(&collection, input.as_ref(), args)
        }
        Commands::Edit {
            input: target,
            title,
            status,
            series,
            tags,
        } => {
            tracing::debug!("Running edit command");
            let edit = RecordEdit {
                title: title.clone(),
                status: status.clone(),
                series: series.clone(),
                tags: tags.clone(),
                body: None,
            };
            edit::run_edit_command(&collection, input.as_ref(), join_words(target), edit)
        }
        Commands::Find {
            query,
            status,
            limit,
            format,
        } => {
            tracing::debug!("Running find command");
            find::run_find_command(
                &collection,
                input.as_ref(),
                join_words(query),
                status.clone(),
                *limit,
                *format,
            )
        }
        Commands::Domain { value } => {
            tracing::debug!("Running domain command");
            domain::run_domain_command(&collection, input.as_ref(), join_words(value))
        }
        Commands::Completion { .. } => Ok(()),
    }
}
