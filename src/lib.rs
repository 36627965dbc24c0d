// For `error_chain!`
#![recursion_limit = "1024"]

extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

#[macro_use]
extern crate error_chain;

pub mod errors {
    error_chain!{
        errors {
            /// The book source file does not exist (includes the path that
            /// was tried).
            BookSourceNotFound(path: String) {
                description("book source does not exist")
                display("book source '{}' does not exist", path)
            }
            /// The interactive channel ended before every book received
            /// a progress entry. No partial result escapes in this case.
            IncompleteInput {
                description("incomplete input")
                display("input ended before all books were recorded")
            }
            /// An IO error (usually caused by `std::io::Error`).
            Io(t: String) {
                description("io error")
                display("{}", t)
            }
            /// A JSON error (usually caused by `serde_json::Error`).
            Json(t: String) {
                description("json error")
                display("{}", t)
            }
        }
    }
}

pub use errors::*;

pub mod book;
pub mod collect;
pub mod render;

pub use book::{Book, ProgressEntry};
pub use collect::collect_progress;
pub use render::fragment;
