use folio::{Collection, IndexEntry, InputProvider, SearchQuery, SearchResults};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult, IntoCliResult};
use crate::exit_codes::EXIT_FAILURE;

const MISSING_QUERY: &str = "Provide a search term, e.g. folio find rust";

/// One entry as two lines: the title, then the indented path with
/// annotations for the fields that are set
pub fn format_entry(entry: &IndexEntry) -> String {
    let fields = &entry.fields;
    let title = if fields.title.is_empty() {
        "Untitled"
    } else {
        fields.title.as_str()
    };

    let mut line = format!("{}\n  {}", title, entry.path);
    if !fields.status.is_empty() {
        line.push_str(&format!(" | status: {}", fields.status));
    }
    if !fields.series.is_empty() {
        line.push_str(&format!(" | series: {}", fields.series));
    }
    if !fields.tags.is_empty() {
        line.push_str(&format!(" | tags: {}", fields.tags.join(", ")));
    }
    line
}

/// Text report for `results`; the count is taken before the limit
pub fn format_text(query: &str, results: &SearchResults) -> String {
    if results.total == 0 {
        return format!("No matches for \"{}\".", query);
    }

    let mut out = format!("Found {} match(es):", results.total);
    for entry in &results.entries {
        out.push('\n');
        out.push_str(&format_entry(entry));
    }
    out
}

/// Search the collection and print the matches
pub fn run_find_command(
    collection: &Collection,
    input: &dyn InputProvider,
    query: String,
    status: Option<String>,
    limit: usize,
    format: OutputFormat,
) -> CliResult<()> {
    let query = if query.is_empty() {
        input.ask_required("Search term", "")?
    } else {
        query
    };
    if query.is_empty() {
        return Err(CliError::new(MISSING_QUERY, EXIT_FAILURE));
    }

    let results = collection.search(&SearchQuery {
        text: query.clone(),
        status,
        limit,
    });

    match format {
        OutputFormat::Text => println!("{}", format_text(&query, &results)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&results.entries).cli_general_error()?;
            println!("{}", json);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio::RecordFields;
    use std::path::PathBuf;

    fn entry(title: &str, status: &str, series: &str, tags: &[&str], path: &str) -> IndexEntry {
        IndexEntry {
            fields: RecordFields {
                title: title.into(),
                status: status.into(),
                series: series.into(),
                summary: String::new(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
            path: path.into(),
            file: PathBuf::from(path),
        }
    }

    #[test]
    fn test_entry_with_every_annotation() {
        let e = entry(
            "Hello World",
            "published",
            "intro",
            &["rust", "web"],
            "content/2024/03/05/01-hello-world/article.md",
        );
        assert_eq!(
            format_entry(&e),
            "Hello World\n  content/2024/03/05/01-hello-world/article.md | status: published | series: intro | tags: rust, web"
        );
    }

    #[test]
    fn test_entry_without_metadata() {
        let e = entry("", "", "", &[], "content/2023/12/31/01-notes/article.md");
        assert_eq!(
            format_entry(&e),
            "Untitled\n  content/2023/12/31/01-notes/article.md"
        );
    }

    #[test]
    fn test_text_report_uses_total_before_limit() {
        let results = SearchResults {
            total: 3,
            entries: vec![entry("A", "draft", "", &[], "content/a/article.md")],
        };
        let text = format_text("a", &results);
        assert!(text.starts_with("Found 3 match(es):\nA\n"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_text_report_without_matches() {
        assert_eq!(
            format_text("zebra", &SearchResults::default()),
            "No matches for \"zebra\"."
        );
    }
}
