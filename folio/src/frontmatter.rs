//! Frontmatter codec
//!
//! A record file is a `---` delimited metadata block followed by a free-form
//! body. Only the subset of syntax Folio writes itself is understood:
//! single-line `key: value` scalars and one flat `tags:` list of
//! `  - value` items. Everything else in the block is carried through as
//! opaque lines.
//!
//! Decoding builds an ordered line model ([`Frontmatter`]); edits mutate that
//! model and [`Document::encode`] serialises it again. Lines that were not
//! edited come back byte for byte, so decoding and re-encoding an untouched
//! record reproduces the original text. A record whose opening delimiter
//! ends in `\r\n` is written back with `\r\n` line endings in the block.

use crate::error::{FolioError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::Path;

/// Delimiter line that opens and closes the metadata block
pub const DELIMITER: &str = "---";

/// Key of the list field
pub const TAGS_KEY: &str = "tags";

static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid blank regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// `key: value` scalar, kept verbatim
    Field { key: String, raw: String },
    /// `tags:` header plus its indented or hyphen-prefixed continuation lines
    Tags { raw: Vec<String> },
    /// Anything the codec does not interpret
    Other(String),
}

impl Line {
    fn classify(raw: &str) -> Line {
        if raw.starts_with([' ', '\t', '-']) {
            return Line::Other(raw.to_string());
        }
        match raw.split_once(':') {
            Some((key, _)) if !key.is_empty() && !key.contains(char::is_whitespace) => {
                if key == TAGS_KEY {
                    Line::Tags {
                        raw: vec![raw.to_string()],
                    }
                } else {
                    Line::Field {
                        key: key.to_string(),
                        raw: raw.to_string(),
                    }
                }
            }
            _ => Line::Other(raw.to_string()),
        }
    }

    fn raw_lines(&self) -> Vec<&str> {
        match self {
            Line::Field { raw, .. } | Line::Other(raw) => vec![raw.as_str()],
            Line::Tags { raw } => raw.iter().map(String::as_str).collect(),
        }
    }

    fn is_field(&self, wanted: &str) -> bool {
        matches!(self, Line::Field { key, .. } if key == wanted)
    }
}

fn is_tag_continuation(raw: &str) -> bool {
    raw.starts_with([' ', '\t', '-'])
}

/// Strip one layer of matching quotes. Double-quoted values also lose the
/// backslash escapes added by [`quote`].
fn unquote(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        let inner = &trimmed[1..trimmed.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some(next) => out.push(next),
                    None => out.push('\\'),
                }
            } else {
                out.push(c);
            }
        }
        return out;
    }
    if trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'') {
        return trimmed[1..trimmed.len() - 1].to_string();
    }
    trimmed.to_string()
}

/// Fold a value onto one line: line breaks and the whitespace around them
/// become a single space. Values without line breaks are returned as given.
pub fn single_line(value: &str) -> String {
    if !value.contains(['\n', '\r']) {
        return value.to_string();
    }
    value
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a value as a double-quoted scalar
pub fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Parsed metadata block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    lines: Vec<Line>,
}

impl Frontmatter {
    /// Parse the text between the delimiter lines.
    pub fn parse(block: &str) -> Self {
        let mut lines: Vec<Line> = Vec::new();
        for raw in block.split('\n') {
            if let Some(Line::Tags { raw: tag_lines }) = lines.last_mut() {
                if is_tag_continuation(raw) {
                    tag_lines.push(raw.to_string());
                    continue;
                }
            }
            lines.push(Line::classify(raw));
        }
        Self { lines }
    }

    /// Value of the first `key: value` line with one layer of quotes removed,
    /// or an empty string when the key is absent.
    pub fn scalar(&self, key: &str) -> String {
        self.lines
            .iter()
            .find_map(|line| match line {
                Line::Field { key: k, raw } if k == key => raw
                    .split_once(':')
                    .map(|(_, value)| unquote(value)),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Whether a scalar line for `key` exists
    pub fn contains(&self, key: &str) -> bool {
        self.lines.iter().any(|line| line.is_field(key))
    }

    /// Items of the first `tags:` block, in file order
    pub fn tags(&self) -> Vec<String> {
        self.lines
            .iter()
            .find_map(|line| match line {
                Line::Tags { raw } => Some(
                    raw.iter()
                        .skip(1)
                        .map(|item| {
                            let item = item.trim_start();
                            item.strip_prefix('-').unwrap_or(item).trim().to_string()
                        })
                        .filter(|item| !item.is_empty())
                        .collect(),
                ),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Replace the first `key:` line with `line`, or append `line` when the
    /// key is absent. Other lines keep their position. `line` must start
    /// with `key:`.
    fn set_line(&mut self, key: &str, line: impl Into<String>) {
        let line = line.into();
        if let Some(existing) = self.lines.iter_mut().find(|l| l.is_field(key)) {
            *existing = Line::Field {
                key: key.to_string(),
                raw: line,
            };
            return;
        }
        self.trim_end();
        self.lines.push(Line::Field {
            key: key.to_string(),
            raw: line,
        });
    }

    /// Set `key: value` with the value written verbatim on one line
    pub fn set_plain(&mut self, key: &str, value: &str) {
        self.set_line(key, format!("{key}: {}", single_line(value)));
    }

    /// Set `key: "value"` on one line with quotes escaped
    pub fn set_quoted(&mut self, key: &str, value: &str) {
        self.set_line(key, format!("{key}: {}", quote(&single_line(value))));
    }

    /// Delete the first `key:` line; no-op when absent
    pub fn remove(&mut self, key: &str) {
        if let Some(idx) = self.lines.iter().position(|l| l.is_field(key)) {
            self.lines.remove(idx);
        }
    }

    /// Rewrite the tag block. An empty list removes the block entirely.
    pub fn set_tags(&mut self, tags: &[String]) {
        let position = self
            .lines
            .iter()
            .position(|l| matches!(l, Line::Tags { .. }));

        if tags.is_empty() {
            if let Some(idx) = position {
                self.lines.remove(idx);
            }
            return;
        }

        let mut raw = Vec::with_capacity(tags.len() + 1);
        raw.push(format!("{TAGS_KEY}:"));
        raw.extend(tags.iter().map(|tag| format!("  - {tag}")));
        let block = Line::Tags { raw };

        match position {
            Some(idx) => self.lines[idx] = block,
            None => {
                self.trim_end();
                self.lines.push(block);
            }
        }
    }

    /// Drop trailing whitespace from the end of the block, like trimming the
    /// serialised text before appending a line.
    fn trim_end(&mut self) {
        while matches!(self.lines.last(), Some(Line::Other(raw)) if raw.trim().is_empty()) {
            self.lines.pop();
        }
        match self.lines.last_mut() {
            Some(Line::Field { raw, .. }) | Some(Line::Other(raw)) => {
                let len = raw.trim_end().len();
                raw.truncate(len);
            }
            Some(Line::Tags { raw }) => {
                if let Some(last) = raw.last_mut() {
                    let len = last.trim_end().len();
                    last.truncate(len);
                }
            }
            None => {}
        }
    }
}

impl fmt::Display for Frontmatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .lines
            .iter()
            .flat_map(Line::raw_lines)
            .collect::<Vec<_>>()
            .join("\n");
        f.write_str(&joined)
    }
}

/// Collapse runs of blank lines to a single blank line and trim the block.
///
/// Applying it twice gives the same result as applying it once.
pub fn collapse_blank_lines(block: &str) -> String {
    BLANK_RUN_RE.replace_all(block, "\n\n").trim().to_string()
}

/// Line terminator used for the delimiters and the metadata block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The terminator text
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// A whole record file: metadata block plus body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Metadata model
    pub frontmatter: Frontmatter,
    /// Everything after the closing delimiter line, untouched
    pub body: String,
    /// Terminator of the delimiter and metadata lines, taken from the
    /// opening delimiter
    pub line_ending: LineEnding,
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches([' ', '\t', '\r']) == DELIMITER
}

impl Document {
    /// Split raw text into metadata and body.
    ///
    /// The first line must be a delimiter and a later line must close the
    /// block; the block holds at least one (possibly empty) line. Returns
    /// `None` otherwise.
    pub fn parse(raw: &str) -> Option<Self> {
        let (opening, rest) = raw.split_once('\n')?;
        if !is_delimiter(opening) {
            return None;
        }
        let line_ending = if opening.ends_with('\r') {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };

        let mut offset = 0;
        let mut index = 0;
        for line in rest.split_inclusive('\n') {
            let content = line.strip_suffix('\n').unwrap_or(line);
            if index > 0 && is_delimiter(content) {
                // offset points at the closing line; the newline before it
                // belongs to neither part
                let block = &rest[..offset - 1];
                let body = &rest[offset + line.len()..];
                let frontmatter = match line_ending {
                    LineEnding::Lf => Frontmatter::parse(block),
                    LineEnding::CrLf => {
                        let block = block.strip_suffix('\r').unwrap_or(block);
                        Frontmatter::parse(&block.replace("\r\n", "\n"))
                    }
                };
                return Some(Self {
                    frontmatter,
                    body: body.to_string(),
                    line_ending,
                });
            }
            offset += line.len();
            index += 1;
        }
        None
    }

    /// Like [`Document::parse`] but reports a missing block as
    /// [`FolioError::MissingFrontmatter`] for `path`.
    pub fn decode(raw: &str, path: &Path) -> Result<Self> {
        Self::parse(raw).ok_or_else(|| FolioError::MissingFrontmatter {
            path: path.to_path_buf(),
        })
    }

    /// Document with `\n` line endings
    pub fn new(frontmatter: Frontmatter, body: impl Into<String>) -> Self {
        Self {
            frontmatter,
            body: body.into(),
            line_ending: LineEnding::Lf,
        }
    }

    /// Reassemble the delimited document
    pub fn encode(&self) -> String {
        let block = collapse_blank_lines(&self.frontmatter.to_string());
        let eol = self.line_ending.as_str();
        let block = match self.line_ending {
            LineEnding::Lf => block,
            LineEnding::CrLf => block.replace('\n', eol),
        };
        format!("{DELIMITER}{eol}{block}{eol}{DELIMITER}{eol}{}", self.body)
    }
}
