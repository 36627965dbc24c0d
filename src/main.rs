extern crate book_progress;

extern crate ansi_term;
extern crate clap;

use std::fs::File;
use std::io::{self, Write};

use ansi_term::{Colour, Style};
use clap::{Arg, ArgMatches, App, AppSettings};

use book_progress::{book, collect, render};
use book_progress::errors::*;

/// Describes all the styles that can be used in printing text.
/// This can be used for custom themes eventually maybe?
/// Mostly just good for disabling custom formatting.
#[derive(Debug, Clone)]
struct StyleSet {
    /// Normal text
    normal: Style,
    /// Title text
    title: Style,
    /// Error text
    error: Style,
}

impl StyleSet {
    /// Preset for the --no-ansi option (no style)
    fn no_ansi() -> StyleSet {
        StyleSet {
            normal: Style::new(),
            title: Style::new(),
            error: Style::new(),
        }
    }

    /// Preset for the normal "fancy" style
    fn fancy() -> StyleSet {
        StyleSet {
            normal: Style::new(),
            title: Colour::White.bold(),
            error: Colour::Red.normal(),
        }
    }
}

/// Returns styled text (using a format string syntax)
macro_rules! style {
    ($style:expr, $($arg:tt)*) => {
        {{
            $style.paint(format!( $($arg)*) )
        }}
    }
}

/// Prints a line of text in the given style
macro_rules! styleln {
    ($style:expr, $($arg:tt)*) => {
        println!("{}", style!($style, $($arg)*))
    }
}

pub fn main() {
    let matches = App::new("book-progress")
        .version("0.1.0")
        .author("Ian Johnson <ianprime0509@gmail.com>")
        .about("Collects daily reading progress and renders it as an animated HTML fragment")
        .setting(AppSettings::ColoredHelp)
        .arg(Arg::with_name("no-ansi")
            .help("Disables fancy text output")
            .short("n")
            .long("no-ansi"))
        .arg(Arg::with_name("BOOKS")
            .help("The book source file (a JSON array of books)")
            .default_value("books.json"))
        .arg(Arg::with_name("output")
            .short("o")
            .long("output")
            .value_name("OUTPUT")
            .default_value("book-progress.html")
            .help("The output filename for the rendered fragment")
            .takes_value(true))
        .after_help("book-progress asks for a start-of-day and end-of-day percentage for every \
                     book in the source file, then writes a self-contained HTML fragment that \
                     animates each book's progress bar between the two. The source file is a \
                     JSON array of objects with 'title', 'author' and 'cover' fields.")
        .get_matches();

    // Whether we should disable the fancy ANSI terminal text
    let no_ansi = matches.is_present("no-ansi");
    // The style to use
    let style_set = if no_ansi {
        StyleSet::no_ansi()
    } else {
        StyleSet::fancy()
    };

    // Handle errors nicely
    if let Err(ref e) = run(matches, &style_set) {
        styleln!(style_set.error, "Error: {}", e);

        for e in e.iter().skip(1) {
            styleln!(style_set.error, "Caused by: {}", e);
        }

        if let Some(backtrace) = e.backtrace() {
            styleln!(style_set.error, "Backtrace: {:?}", backtrace);
        }

        std::process::exit(1);
    }
}

/// The main program logic: load the books, collect progress interactively,
/// render the fragment and write it out. Errors are returned for `main`
/// to print; nothing is written if any step fails.
fn run(m: ArgMatches, style_set: &StyleSet) -> Result<()> {
    // We can unwrap these because they have default values
    let books_path = m.value_of("BOOKS").unwrap();
    let output_path = m.value_of("output").unwrap();

    // Any failure to load the source is fatal; no prompt is issued.
    let books = book::load_books(books_path).chain_err(|| "could not load book source")?;

    styleln!(style_set.title, "Book Progress Tracker");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let entries = {
        let mut input = stdin.lock();
        let mut output = stdout.lock();
        let entries = collect::collect_progress(&books, &mut input, &mut output)
            .chain_err(|| "could not collect progress")?;
        // Make sure everything the collector printed is out before our
        // own confirmation.
        output.flush().chain_err(|| ErrorKind::Io("could not flush output".into()))?;
        entries
    };

    let file = File::create(output_path)
        .chain_err(|| ErrorKind::Io(format!("could not create output file '{}'", output_path)))?;
    render::render_to(&entries, file).chain_err(|| "could not write fragment")?;

    styleln!(style_set.normal, "HTML file generated: {}", output_path);
    Ok(())
}
