//! This module provides the `Book` and `ProgressEntry` types, along with
//! the `load_books` function for reading the book source file. The book
//! source is a JSON array of objects with `title`, `author` and `cover`
//! fields, read once at startup and never mutated afterwards.

use std::fs::File;
use std::path::Path;

use serde_json;

use super::errors::*;

/// A single book as supplied by the book source. A book has no explicit
/// identifier; its identity is its position in the source sequence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Book {
    title: String,
    author: String,
    /// A reference to the cover image (a path or URL); passed through
    /// to the rendered fragment without interpretation.
    cover: String,
}

/// A book together with its validated start/end percentages for the day.
///
/// An entry is only ever constructed with both percentages present and
/// valid; there is no state in which only one endpoint exists. The wire
/// names of the percentage fields match the payload embedded in the
/// rendered fragment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProgressEntry {
    #[serde(flatten)]
    book: Book,
    #[serde(rename = "startProgress")]
    start_progress: f64,
    #[serde(rename = "endProgress")]
    end_progress: f64,
}

impl Book {
    /// Returns a `Book` with the given title, author and cover reference.
    pub fn new(title: &str, author: &str, cover: &str) -> Book {
        Book {
            title: title.into(),
            author: author.into(),
            cover: cover.into(),
        }
    }

    /// Returns the title of the book.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the author of the book.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the cover image reference of the book.
    pub fn cover(&self) -> &str {
        &self.cover
    }
}

impl ProgressEntry {
    /// Returns an entry pairing the given book with its percentages.
    /// Callers are expected to have validated the percentages already;
    /// see `collect::valid_percentage`.
    pub fn new(book: Book, start_progress: f64, end_progress: f64) -> ProgressEntry {
        ProgressEntry {
            book: book,
            start_progress: start_progress,
            end_progress: end_progress,
        }
    }

    /// Returns the book this entry describes.
    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Returns the percentage read at the start of the day.
    pub fn start_progress(&self) -> f64 {
        self.start_progress
    }

    /// Returns the percentage read at the end of the day.
    pub fn end_progress(&self) -> f64 {
        self.end_progress
    }
}

/// Reads the book source file at the given path.
///
/// The file must contain a JSON array of book objects. A missing file is
/// reported as `BookSourceNotFound`; an unreadable or unparsable file is
/// an `Io` or `Json` error. All three are fatal to the caller: no prompts
/// should be issued and no artifact written if the source cannot load.
pub fn load_books<P: AsRef<Path>>(path: P) -> Result<Vec<Book>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ErrorKind::BookSourceNotFound(path.display().to_string()).into());
    }
    let f = File::open(path).chain_err(|| ErrorKind::Io(format!("could not open book source '{}'", path.display())))?;

    serde_json::from_reader(f).chain_err(|| ErrorKind::Json(format!("json error in book source '{}'", path.display())))
}
