//! Authorship facts reconstructed from commit history.
//!
//! History lines have the shape `YYYY-MM-DD-Author Name`. Author names may
//! themselves contain `-`, so a line is split into at most four fields.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ComplianceError;
use crate::tool::VersionControl;

/// First and last year of an author's contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSpan {
    pub first: i32,
    pub last: i32,
}

impl YearSpan {
    pub fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    /// One year when the span is a single year, otherwise both bounds.
    pub fn years(&self) -> Vec<i32> {
        if self.first < self.last {
            vec![self.first, self.last]
        } else {
            vec![self.first]
        }
    }
}

/// Author name to the calendar years of their commits.
///
/// Iterates in author-name order. Every author has at least one year because
/// entries are only created through `insert`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorYears {
    inner: BTreeMap<String, BTreeSet<i32>>,
}

impl AuthorYears {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding a single author and year.
    pub fn single(author: impl Into<String>, year: i32) -> Self {
        let mut map = Self::new();
        map.insert(author, year);
        map
    }

    pub fn insert(&mut self, author: impl Into<String>, year: i32) {
        self.inner.entry(author.into()).or_default().insert(year);
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn years(&self, author: &str) -> Option<&BTreeSet<i32>> {
        self.inner.get(author)
    }

    /// `(author, first..last)` pairs in author order.
    pub fn spans(&self) -> impl Iterator<Item = (&str, YearSpan)> {
        self.inner.iter().filter_map(|(author, years)| {
            let first = *years.first()?;
            let last = *years.last()?;
            Some((author.as_str(), YearSpan::new(first, last)))
        })
    }
}

/// Parse one `YYYY-MM-DD-Author` history line into `(year, author)`.
pub fn parse_line(line: &str) -> Result<(i32, String), ComplianceError> {
    let malformed = |reason: &str| ComplianceError::MalformedHistory {
        line: line.to_string(),
        reason: reason.to_string(),
    };

    let mut fields = line.splitn(4, '-');
    let (Some(year), Some(month), Some(day), Some(author)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed("expected `YYYY-MM-DD-author`"));
    };

    let date = NaiveDate::parse_from_str(&format!("{year}-{month}-{day}"), "%Y-%m-%d")
        .map_err(|e| malformed(&format!("invalid commit date: {e}")))?;

    let author = author.trim();
    if author.is_empty() {
        return Err(malformed("missing author name"));
    }

    Ok((date.year(), author.to_string()))
}

/// Build an `AuthorYears` from raw history lines. Blank lines are skipped;
/// any other line that does not parse fails the whole batch.
pub fn author_years<I, S>(lines: I) -> Result<AuthorYears, ComplianceError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = AuthorYears::new();
    for line in lines {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        let (year, author) = parse_line(line)?;
        map.insert(author, year);
    }
    Ok(map)
}

/// Authors and years for `path`, following renames. Empty for files that
/// were never committed.
pub fn inspect(vcs: &impl VersionControl, path: &str) -> Result<AuthorYears> {
    let lines = vcs.history(path)?;
    Ok(author_years(lines)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::fakes::FakeVcs;

    #[test]
    fn groups_years_by_author() {
        let map = author_years([
            "2021-03-04-Alice",
            "2022-11-30-Alice",
            "2020-01-01-Bob",
        ])
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(
            map.years("Alice").unwrap().iter().copied().collect::<Vec<_>>(),
            vec![2021, 2022]
        );
        assert_eq!(
            map.years("Bob").unwrap().iter().copied().collect::<Vec<_>>(),
            vec![2020]
        );
    }

    #[test]
    fn author_names_may_contain_dashes() {
        let (year, author) = parse_line("2019-07-15-Jean-Luc Picard").unwrap();
        assert_eq!(year, 2019);
        assert_eq!(author, "Jean-Luc Picard");
    }

    #[test]
    fn repeated_years_collapse() {
        let map = author_years(["2021-01-01-Alice", "2021-06-01-Alice"]).unwrap();
        assert_eq!(map.years("Alice").unwrap().len(), 1);
    }

    #[test]
    fn spans_use_min_and_max_only() {
        let map = author_years([
            "2018-01-01-Alice",
            "2020-01-01-Alice",
            "2023-01-01-Alice",
            "2022-05-05-Bob",
        ])
        .unwrap();

        let spans: Vec<_> = map.spans().collect();
        assert_eq!(
            spans,
            vec![
                ("Alice", YearSpan::new(2018, 2023)),
                ("Bob", YearSpan::new(2022, 2022)),
            ]
        );
        assert_eq!(spans[0].1.years(), vec![2018, 2023]);
        assert_eq!(spans[1].1.years(), vec![2022]);
    }

    #[test]
    fn truncated_line_is_malformed() {
        let err = author_years(["2021-03-Alice"]).unwrap_err();
        assert!(matches!(err, ComplianceError::MalformedHistory { .. }));
    }

    #[test]
    fn invalid_date_is_malformed() {
        assert!(parse_line("20x1-03-04-Alice").is_err());
        assert!(parse_line("2021-13-04-Alice").is_err());
    }

    #[test]
    fn empty_author_is_malformed() {
        assert!(parse_line("2021-03-04-").is_err());
        assert!(parse_line("2021-03-04-   ").is_err());
    }

    #[test]
    fn one_bad_line_fails_the_batch() {
        let result = author_years(["2021-03-04-Alice", "garbage"]);
        assert!(result.is_err());
    }

    #[test]
    fn blank_lines_are_ignored() {
        let map = author_years(["", "2021-03-04-Alice", "  "]).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn uncommitted_file_yields_empty_map() {
        let vcs = FakeVcs::default();
        let map = inspect(&vcs, "new.py").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn inspect_reads_history_through_vcs() {
        let vcs = FakeVcs::default().history_for("a.py", &["2024-02-02-Dana"]);
        let map = inspect(&vcs, "a.py").unwrap();
        assert_eq!(map, AuthorYears::single("Dana", 2024));
    }
}
