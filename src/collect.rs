//! This module provides the interactive progress collector: for each book
//! in the source sequence it asks for a start-of-day and an end-of-day
//! percentage, validates the pair, and retries the same book until a valid
//! pair is entered. The prompt/response channels are injected as `BufRead`
//! and `Write` values so that tests can script a session without a real
//! terminal.

use std::io::{BufRead, Write};

use book::{Book, ProgressEntry};
use super::errors::*;

/// The prompt printed before reading the start-of-day percentage.
pub const START_PROMPT: &'static str = "Start of day percentage (0-100): ";
/// The prompt printed before reading the end-of-day percentage.
pub const END_PROMPT: &'static str = "End of day percentage (0-100): ";
/// The notice printed when a percentage pair fails validation.
pub const INVALID_NOTICE: &'static str = "Please enter valid percentages between 0 and 100";

/// Returns whether the given number is an acceptable percentage:
/// finite and within the closed interval [0, 100].
pub fn valid_percentage(p: f64) -> bool {
    p.is_finite() && 0.0 <= p && p <= 100.0
}

/// Writes a prompt and reads one line of response from the input channel.
///
/// The prompt is flushed before reading so that it appears even on an
/// unbuffered terminal. An empty read (end of input) is an
/// `IncompleteInput` error, since every remaining book would be left
/// without an entry.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}", prompt).chain_err(|| ErrorKind::Io("could not write prompt".into()))?;
    output.flush().chain_err(|| ErrorKind::Io("could not flush prompt".into()))?;

    let mut answer = String::new();
    let n = input.read_line(&mut answer)
        .chain_err(|| ErrorKind::Io("could not read response".into()))?;
    if n == 0 {
        return Err(ErrorKind::IncompleteInput.into());
    }
    Ok(answer.trim().to_owned())
}

/// Collects a validated progress entry for every book, in order.
///
/// For each book, the title and author are displayed, then the two
/// percentage prompts are issued. If either response fails to parse as a
/// finite number in [0, 100], a notice is printed and the *pair* is asked
/// again for the same book; a valid value is never kept while its partner
/// is retried. The result has exactly one entry per book, in book order.
///
/// An empty book list returns an empty result without touching the
/// channels. If the input channel ends before every book has an entry,
/// the whole collection fails with `IncompleteInput` and no partial
/// result is returned.
pub fn collect_progress<R: BufRead, W: Write>(books: &[Book],
                                              input: &mut R,
                                              output: &mut W)
                                              -> Result<Vec<ProgressEntry>> {
    let mut entries = Vec::with_capacity(books.len());

    for book in books {
        writeln!(output, "\n{} by {}", book.title(), book.author())
            .chain_err(|| ErrorKind::Io("could not write book heading".into()))?;

        // Ask until the pair validates; both values are discarded together
        // on any failure.
        loop {
            let start = ask(input, output, START_PROMPT)?;
            let end = ask(input, output, END_PROMPT)?;

            let parsed = match (start.parse::<f64>(), end.parse::<f64>()) {
                (Ok(s), Ok(e)) if valid_percentage(s) && valid_percentage(e) => Some((s, e)),
                _ => None,
            };

            match parsed {
                Some((s, e)) => {
                    entries.push(ProgressEntry::new(book.clone(), s, e));
                    break;
                }
                None => {
                    writeln!(output, "{}", INVALID_NOTICE)
                        .chain_err(|| ErrorKind::Io("could not write validation notice".into()))?;
                }
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use book::Book;
    use errors::*;

    fn books(n: usize) -> Vec<Book> {
        (0..n)
            .map(|i| Book::new(&format!("Book {}", i), &format!("Author {}", i), "cover.jpg"))
            .collect()
    }

    /// Runs the collector over scripted input lines, returning the result
    /// and everything written to the output channel.
    fn run(books: &[Book], lines: &[&str]) -> (Result<Vec<ProgressEntry>>, String) {
        let script = lines.iter().map(|l| format!("{}\n", l)).collect::<String>();
        let mut input = Cursor::new(script);
        let mut output = Vec::new();
        let result = collect_progress(books, &mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn boundary_values_are_accepted() {
        let books = books(1);
        let (result, _) = run(&books, &["0", "100"]);
        let entries = result.unwrap();
        assert_eq!(entries[0].start_progress(), 0.0);
        assert_eq!(entries[0].end_progress(), 100.0);
    }

    #[test]
    fn out_of_range_and_non_numeric_input_is_rejected() {
        // Each bad value invalidates a pair; a valid pair follows so the
        // collector can finish.
        for &bad in &["100.0001", "-0.1", "abc", "", "inf", "NaN"] {
            let books = books(1);
            let (result, output) = run(&books, &[bad, "50", "10", "55"]);
            let entries = result.unwrap();
            assert_eq!(entries.len(), 1, "input {:?} should have been rejected", bad);
            assert_eq!(entries[0].start_progress(), 10.0);
            assert_eq!(entries[0].end_progress(), 55.0);
            assert_eq!(output.matches(INVALID_NOTICE).count(), 1);
        }
    }

    #[test]
    fn rejected_pair_reprompts_the_same_book() {
        // Scenario: first pair rejected (101 > 100), second pair accepted.
        let books = vec![Book::new("Dune", "Herbert", "cover1")];
        let (result, output) = run(&books, &["10", "101", "10", "55"]);

        let entries = result.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].book().title(), "Dune");
        assert_eq!(entries[0].start_progress(), 10.0);
        assert_eq!(entries[0].end_progress(), 55.0);

        // Both prompts were issued twice for the single book.
        assert_eq!(output.matches(START_PROMPT).count(), 2);
        assert_eq!(output.matches(END_PROMPT).count(), 2);
        assert_eq!(output.matches(INVALID_NOTICE).count(), 1);
    }

    #[test]
    fn empty_book_list_issues_no_prompts() {
        let (result, output) = run(&[], &[]);
        assert_eq!(result.unwrap(), Vec::new());
        assert_eq!(output, "");
    }

    #[test]
    fn regression_is_passed_through_unchanged() {
        let books = books(1);
        let (result, _) = run(&books, &["80", "20"]);
        let entries = result.unwrap();
        assert_eq!(entries[0].start_progress(), 80.0);
        assert_eq!(entries[0].end_progress(), 20.0);
    }

    #[test]
    fn result_preserves_book_order_and_length() {
        let books = books(3);
        let (result, _) = run(&books, &["1", "2", "3", "4", "5", "6"]);
        let entries = result.unwrap();
        assert_eq!(entries.len(), books.len());
        for (entry, book) in entries.iter().zip(&books) {
            assert_eq!(entry.book(), book);
        }
    }

    #[test]
    fn identical_scripts_produce_identical_results() {
        let books = books(2);
        let script = &["10", "55", "abc", "1", "30", "60"];
        let (first, _) = run(&books, script);
        let (second, _) = run(&books, script);
        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn exhausted_input_is_incomplete() {
        let books = books(2);
        let (result, _) = run(&books, &["10", "55"]);
        match result {
            Err(Error(ErrorKind::IncompleteInput, _)) => {}
            other => panic!("expected IncompleteInput, got {:?}", other),
        }
    }

    #[test]
    fn displays_title_and_author_before_prompting() {
        let books = vec![Book::new("Dune", "Herbert", "cover1")];
        let (_, output) = run(&books, &["10", "55"]);
        let heading = output.find("Dune by Herbert").unwrap();
        let prompt = output.find(START_PROMPT).unwrap();
        assert!(heading < prompt);
    }
}
