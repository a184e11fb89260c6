use colored::*;
use folio::{Collection, InputProvider};

use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_FAILURE;

/// Point the site at a custom domain
pub fn run_domain_command(
    collection: &Collection,
    input: &dyn InputProvider,
    value: String,
) -> CliResult<()> {
    let value = if value.is_empty() {
        let (site, warning) = collection.site();
        if let Some(warning) = warning {
            tracing::warn!("{}", warning);
        }
        let current = site.custom_domain.unwrap_or_default();
        input.ask_required("Custom domain (e.g. my-blog.com)", &current)?
    } else {
        value
    };
    if value.is_empty() {
        return Err(CliError::new(
            "Provide a domain, e.g. folio domain my-blog.com",
            EXIT_FAILURE,
        ));
    }

    let update = collection.set_domain(&value)?;
    println!(
        "{} {}",
        "Updated".green(),
        collection.layout().relative_path(&update.path)
    );
    println!("- siteUrl: {}", update.site_url);
    println!("- customDomain: {}", update.custom_domain);
    Ok(())
}
