//! # Folio
//!
//! Storage, metadata and search for a collection of article records.
//!
//! Each record is a text file with a `---` delimited frontmatter block and a
//! free-form body, stored at `content/YYYY/MM/DD/NN-slug/article.md`.
//!
//! ## Features
//!
//! - **Addressing**: sortable, collision-free storage locations and
//!   resolution of paths, directories and published URLs
//! - **Frontmatter**: surgical edits that leave untouched lines byte for byte
//! - **Search**: substring search across titles, summaries, series, tags and
//!   paths with status filtering
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use folio::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let collection = Collection::open("./my-blog")?;
//!
//! let date = CalendarDate::parse("2024-03-05")?;
//! let created = collection.create(&NewRecord::new(date, "Hello World"))?;
//! println!("{}", created.path.display());
//!
//! for entry in collection.search(&SearchQuery::new("hello")).entries {
//!     println!("{} {}", entry.fields.title, entry.path);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Error types and context helpers
pub mod error;

/// Settings and the on-disk layout
pub mod config;

/// File system abstraction
pub mod fs_utils;

/// Slug, tag and date normalisation
pub mod normalize;

/// Frontmatter parsing and serialisation
pub mod frontmatter;

/// Record fields and status
pub mod record;

/// Storage locations and record resolution
pub mod address;

/// Answers for values the caller did not supply
pub mod input;

/// Site-level settings
pub mod site;

/// Record creation
pub mod create;

/// Record editing
pub mod edit;

/// Collection scanning and search
pub mod index;

/// Project facade
pub mod collection;

pub use address::Ordinal;
pub use collection::Collection;
pub use config::{Config, ContentLayout};
pub use create::{CreatedRecord, NewRecord, NewRecordArgs};
pub use edit::{EditOutcome, OpenRecord, RecordEdit};
pub use error::{ErrorContext, FolioError, Result};
pub use frontmatter::{Document, Frontmatter, LineEnding};
pub use index::{IndexEntry, SearchQuery, SearchResults};
pub use input::{InputProvider, NonInteractive, ScriptedInput};
pub use normalize::CalendarDate;
pub use record::{RecordFields, Status};
pub use site::{DomainUpdate, SiteConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CalendarDate, Collection, Config, ContentLayout, FolioError, InputProvider, NewRecord,
        NonInteractive, RecordEdit, Result, SearchQuery, Status,
    };
}
