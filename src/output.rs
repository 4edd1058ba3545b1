//! Terminal output for index entries and statistics

use crate::index::{Entry, IndexStats};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print entries one per line, term highlighted
pub fn print_entries<'a, I>(entries: I, choice: ColorChoice) -> io::Result<()>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut stdout = StandardStream::stdout(choice);
    for entry in entries {
        write_entry(&mut stdout, entry)?;
    }
    Ok(())
}

/// Write one rendered entry. Uncolored output matches the file format.
pub fn write_entry<W: WriteColor>(out: &mut W, entry: &Entry) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    write!(out, "{}", entry.term().trim())?;
    out.reset()?;

    let pages = entry.page_list();
    if !pages.is_empty() {
        write!(out, " ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", pages)?;
        out.reset()?;
    }

    writeln!(out)
}

/// Print a one-line notice (e.g. "no matches") to stderr
pub fn print_notice(message: &str, choice: ColorChoice) -> io::Result<()> {
    let mut stderr = StandardStream::stderr(choice);
    stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    writeln!(stderr, "{}", message)?;
    stderr.reset()
}

/// Print index statistics
pub fn print_stats<W: Write>(out: &mut W, stats: &IndexStats) -> io::Result<()> {
    writeln!(out, "Index Statistics")?;
    writeln!(out, "================")?;
    writeln!(out)?;
    writeln!(out, "Terms:            {}", stats.terms)?;
    writeln!(out, "Page references:  {}", stats.page_references)?;
    writeln!(out, "Distinct pages:   {}", stats.distinct_pages)?;
    writeln!(out, "Range tokens:     {}", stats.range_tokens)?;
    writeln!(out, "Pages per term:   {:.2}", stats.pages_per_term())?;

    if let (Some(first), Some(last)) = (stats.first_page, stats.last_page) {
        writeln!(out, "Page span:        {}-{}", first, last)?;
    }

    Ok(())
}
