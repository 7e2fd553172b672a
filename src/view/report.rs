use chrono::{DateTime, Utc};
use crossterm::style::Stylize;
use std::io::{self, Write};

use crate::data::{DisplayMode, PrStatus, PullRequest, RepositoryReport};
use crate::icons;
use crate::services::{has_fresh, is_fresh, sort_pulls, FetchError};

/// Print every repository that has at least one fresh pull request.
///
/// Repositories keep the order they were received in. Returns how many
/// repository blocks were written.
pub fn render_reports<W: Write>(
    out: &mut W,
    reports: Vec<RepositoryReport>,
    now: DateTime<Utc>,
    mode: DisplayMode,
) -> io::Result<usize> {
    let mut printed = 0;
    for report in reports {
        if render_repository(out, report, now, mode)? {
            printed += 1;
        }
    }
    Ok(printed)
}

/// Print one repository block. Returns false when it was skipped.
pub fn render_repository<W: Write>(
    out: &mut W,
    mut report: RepositoryReport,
    now: DateTime<Utc>,
    mode: DisplayMode,
) -> io::Result<bool> {
    if report.pulls.is_empty() || !has_fresh(&report.pulls, now) {
        return Ok(false);
    }

    match mode {
        DisplayMode::Plain => writeln!(out, "{}", report.name)?,
        DisplayMode::Styled => writeln!(out, "{}", report.name.as_str().bold())?,
    }

    sort_pulls(&mut report.pulls);
    for pr in report.pulls.iter().filter(|pr| is_fresh(pr, now)) {
        match mode {
            DisplayMode::Plain => render_plain_line(out, pr)?,
            DisplayMode::Styled => render_styled_line(out, pr)?,
        }
    }

    Ok(true)
}

fn render_plain_line<W: Write>(out: &mut W, pr: &PullRequest) -> io::Result<()> {
    writeln!(
        out,
        "{}{}{}{}{}{} ({})",
        icons::INDENT,
        pr.status().label(),
        icons::AUTHOR_SEPARATOR,
        pr.author(),
        icons::TITLE_SEPARATOR,
        pr.title(),
        pr.link()
    )
}

fn render_styled_line<W: Write>(out: &mut W, pr: &PullRequest) -> io::Result<()> {
    let label = pr.status().label();
    write!(out, "{}", icons::INDENT)?;
    match pr.status() {
        PrStatus::Draft => write!(out, "{}", label.white())?,
        PrStatus::Open => write!(out, "{}", label.green())?,
    }
    write!(
        out,
        "{}{}{}",
        icons::AUTHOR_SEPARATOR,
        pr.author(),
        icons::TITLE_SEPARATOR
    )?;
    writeln!(out, "{}", hyperlink(pr.link(), pr.title()))
}

/// Wrap `text` in an OSC 8 terminal hyperlink pointing at `url`
pub fn hyperlink(url: &str, text: &str) -> String {
    format!(
        "{start}{url}{end}{text}{start}{end}",
        start = icons::HYPERLINK_START,
        end = icons::HYPERLINK_END
    )
}

/// List the repositories an isolated run had to leave out.
pub fn render_failures<W: Write>(out: &mut W, failures: &[FetchError]) -> io::Result<()> {
    for failure in failures {
        writeln!(out, "Skipped: {}", failure)?;
    }
    Ok(())
}
