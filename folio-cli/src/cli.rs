use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::io;
use std::path::PathBuf;

/// Environment variable naming the project root when `--root` is absent
pub const ROOT_ENV: &str = "FOLIO_ROOT";

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Create, edit and search dated article records")]
#[command(long_about = "
folio manages a collection of articles stored as markdown files with a
frontmatter block, one per directory under content/YYYY/MM/DD/NN-slug/.

Example usage:
  folio new --title \"Hello World\"        # Create today's record
  folio edit 2024/03/05/01-hello-world    # Edit a record's metadata
  folio find rust --status published      # Search the collection
  folio completion bash > ~/.bashrc.d/folio  # Generate bash completions
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project directory (defaults to $FOLIO_ROOT, then the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new record
    #[command(long_about = "
Creates a record at content/YYYY/MM/DD/NN-slug/article.md. Values not given
as flags are prompted for when stdin is a terminal; otherwise defaults are
used (today's date, a slug derived from the title, status draft).

Exit codes:
  0 - Record created
  1 - Missing content directory or I/O failure
  2 - Validation failure (missing title, invalid date, too many records)

Examples:
  folio new --title \"Hello World\"
  folio new --date 2024-03-05 --title \"Hello World\" --tags \"rust, cli\"
")]
    New {
        /// Creation date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,

        /// Record title
        #[arg(long)]
        title: Option<String>,

        /// Slug override
        #[arg(long)]
        slug: Option<String>,

        /// Status: draft, review, published or archived
        #[arg(long)]
        status: Option<String>,

        /// Short summary
        #[arg(long)]
        summary: Option<String>,

        /// Series name
        #[arg(long)]
        series: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Edit a record's metadata and optionally replace its body
    #[command(long_about = "
Edits an existing record named by a path, a directory or a published URL.
Only the fields given change. Use '-' to clear the series or the tags.
When stdin is piped, its content replaces the record body.

Examples:
  folio edit content/2024/03/05/01-hello-world --status published
  folio edit https://my-blog.com/2024/03/05/01-hello-world/ --tags -
  cat draft.md | folio edit 2024/03/05/01-hello-world
")]
    Edit {
        /// Record path, folder or URL
        input: Vec<String>,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New status
        #[arg(long)]
        status: Option<String>,

        /// New series, or '-' to clear
        #[arg(long, allow_hyphen_values = true)]
        series: Option<String>,

        /// Comma-separated tags, or '-' to clear
        #[arg(long, allow_hyphen_values = true)]
        tags: Option<String>,
    },
    /// Search records
    #[command(long_about = "
Searches titles, summaries, series, tags and paths for a case-insensitive
substring. Newest records come first.

Examples:
  folio find templating
  folio find rust --status draft --limit 5
  folio find rust --format json
")]
    Find {
        /// Search term
        query: Vec<String>,

        /// Only records with this status
        #[arg(long)]
        status: Option<String>,

        /// Maximum number of results; 0 means all
        #[arg(long, default_value_t = 0)]
        limit: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Set the site's custom domain
    #[command(long_about = "
Writes customDomain and siteUrl into content/site.json.

Examples:
  folio domain my-blog.com
  folio domain https://my-blog.com
")]
    Domain {
        /// Domain or URL
        value: Vec<String>,
    },
    /// Generate shell completion scripts
    #[command(long_about = "
Generates shell completion scripts for various shells. Supports:
- bash
- zsh
- fish
- powershell

Examples:
  folio completion bash > ~/.local/share/bash-completion/completions/folio
  folio completion zsh > ~/.zfunc/_folio
  folio completion fish > ~/.config/fish/completions/folio.fish
")]
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    /// Project root: `--root`, then `$FOLIO_ROOT`, then the current directory
    pub fn project_root(&self) -> io::Result<PathBuf> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }
        match std::env::var_os(ROOT_ENV) {
            Some(root) if !root.is_empty() => Ok(PathBuf::from(root)),
            _ => std::env::current_dir(),
        }
    }

    pub fn is_tty() -> bool {
        io::stdout().is_terminal()
    }

    pub fn should_use_color() -> bool {
        Self::is_tty() && std::env::var("NO_COLOR").is_err()
    }
}

/// Join positional words into one value
pub fn join_words(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_help_works() {
        let result = Cli::try_parse_from_args(["folio", "--help"]);
        assert!(result.is_err());

        let error = result.unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_works() {
        let result = Cli::try_parse_from_args(["folio", "--version"]);
        assert!(result.is_err());

        let error = result.unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_no_subcommand() {
        let cli = Cli::try_parse_from_args(["folio"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.debug);
        assert!(!cli.quiet);
        assert!(cli.root.is_none());
    }

    #[test]
    fn test_cli_invalid_subcommand() {
        let error = Cli::try_parse_from_args(["folio", "publish"]).unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_new_with_flags() {
        let cli = Cli::try_parse_from_args([
            "folio",
            "new",
            "--date",
            "2024-03-05",
            "--title",
            "Hello World",
            "--tags",
            "rust, cli",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::New {
                date,
                title,
                slug,
                tags,
                ..
            }) => {
                assert_eq!(date.as_deref(), Some("2024-03-05"));
                assert_eq!(title.as_deref(), Some("Hello World"));
                assert_eq!(slug, None);
                assert_eq!(tags.as_deref(), Some("rust, cli"));
            }
            other => panic!("expected new command, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_accepts_clear_sentinels() {
        let cli = Cli::try_parse_from_args([
            "folio",
            "edit",
            "content/2024/03/05/01-hello",
            "--series",
            "-",
            "--tags",
            "-",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Edit {
                input,
                series,
                tags,
                ..
            }) => {
                assert_eq!(input, vec!["content/2024/03/05/01-hello"]);
                assert_eq!(series.as_deref(), Some("-"));
                assert_eq!(tags.as_deref(), Some("-"));
            }
            other => panic!("expected edit command, got {other:?}"),
        }
    }

    #[test]
    fn test_find_limit_forms() {
        for args in [
            vec!["folio", "find", "rust", "--limit", "3"],
            vec!["folio", "find", "rust", "--limit=3"],
        ] {
            let cli = Cli::try_parse_from_args(args).unwrap();
            match cli.command {
                Some(Commands::Find { query, limit, .. }) => {
                    assert_eq!(query, vec!["rust"]);
                    assert_eq!(limit, 3);
                }
                other => panic!("expected find command, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_find_defaults() {
        let cli = Cli::try_parse_from_args(["folio", "find", "web", "dev"]).unwrap();
        match cli.command {
            Some(Commands::Find {
                query,
                status,
                limit,
                format,
            }) => {
                assert_eq!(join_words(&query), "web dev");
                assert_eq!(status, None);
                assert_eq!(limit, 0);
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("expected find command, got {other:?}"),
        }
    }

    #[test]
    fn test_find_rejects_non_numeric_limit() {
        let result = Cli::try_parse_from_args(["folio", "find", "rust", "--limit", "many"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from_args(["folio", "find", "rust", "--root", "/tmp/blog", "-q"])
                .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/blog")));
        assert_eq!(cli.project_root().unwrap(), PathBuf::from("/tmp/blog"));
    }

    #[test]
    fn test_completion_subcommand() {
        let cli = Cli::try_parse_from_args(["folio", "completion", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completion {
                shell: clap_complete::Shell::Zsh
            })
        ));
    }
}
