//! Vote counts with unit suffixes (`950K`, `1.2M`).

use crate::table::ParseIssueKind;

/// Parses a vote count into a plain number of votes.
///
/// The first number in the text is scaled by the suffix that follows it:
/// none, `K` (thousand), `M` (million) or `B` (billion), case-insensitive.
/// Thousands separators and spaces are ignored.
///
/// # Examples
///
/// ```
/// use movrank_engine::{ParseIssueKind, votes::parse_vote_count};
///
/// assert_eq!(parse_vote_count("1.2M"), Ok(1_200_000.0));
/// assert_eq!(parse_vote_count("950K"), Ok(950_000.0));
/// assert_eq!(parse_vote_count("12,345"), Ok(12_345.0));
/// assert_eq!(parse_vote_count("lots"), Err(ParseIssueKind::MissingNumber));
/// ```
pub fn parse_vote_count(text: &str) -> Result<f64, ParseIssueKind> {
    let cleaned = text
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '\u{a0}'))
        .collect::<String>();
    let start = cleaned
        .find(|c: char| c.is_ascii_digit())
        .ok_or(ParseIssueKind::MissingNumber)?;
    let rest = &cleaned[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    let (number, suffix) = rest.split_at(end);

    let number = number
        .parse::<f64>()
        .map_err(|_| ParseIssueKind::InvalidNumber)?;
    let scale = match suffix {
        "" => 1.0,
        "K" | "k" => 1e3,
        "M" | "m" => 1e6,
        "B" | "b" => 1e9,
        _ => return Err(ParseIssueKind::UnknownUnit),
    };
    Ok(number * scale)
}
