//! Reading rendered CDF reports back into rows.
//!
//! The text report is the only format this crate writes, and tooling downstream of a load test
//! (plotting scripts, regression checks) is built against it. `ReportIterator` parses it back
//! into `CdfRow`s so such tooling can be written in Rust too, or so a report saved by an earlier
//! run can be compared with a fresh histogram.
//!
//! ```
//! use cdflog::serialization::parse_report;
//! use cdflog::Histogram;
//!
//! let mut hist = Histogram::<u64>::new();
//! hist.increment(2.5).unwrap();
//! hist.increment(40.0).unwrap();
//!
//! let rows = parse_report(&hist.render()).unwrap();
//! assert_eq!(rows.len(), hist.iter_cdf().len());
//! assert_eq!(rows.last().map(|r| r.cumulative), Some(1.0));
//! ```
//!
//! Numbers in a report carry six decimals, so parsed `boundary` and fraction values are only as
//! precise as that.

use crate::errors::ReportParseError;
use crate::iterators::{CdfRow, FIELD_SEPARATOR};
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1};
use nom::combinator::map_res;
use nom::error::ErrorKind;
use nom::number::complete::double;
use nom::IResult;
use std::str::FromStr;

/// Parse a whole report. Fails on the first line that cannot be read.
pub fn parse_report(report: &str) -> Result<Vec<CdfRow>, ReportParseError> {
    ReportIterator::new(report).collect()
}

/// Iterates over the rows of a rendered report, one per line.
///
/// After yielding an error the iterator ends.
#[derive(Debug, Clone)]
pub struct ReportIterator<'a> {
    input: &'a str,
    line: usize,
    ended: bool,
}

impl<'a> ReportIterator<'a> {
    /// Create a new iterator over a rendered report.
    pub fn new(input: &'a str) -> ReportIterator<'a> {
        ReportIterator {
            input,
            line: 0,
            ended: false,
        }
    }
}

impl<'a> Iterator for ReportIterator<'a> {
    type Item = Result<CdfRow, ReportParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.ended || self.input.is_empty() {
            self.ended = true;
            return None;
        }

        let line = self.line;
        let res = match cdf_row(self.input) {
            Ok((rest, row)) => match line_end(rest) {
                Ok((rest, _)) => {
                    self.input = rest;
                    self.line += 1;
                    return Some(Ok(row));
                }
                Err(_) if rest.is_empty() => Err(ReportParseError::UnterminatedLine),
                Err(_) => Err(ReportParseError::Malformed { line }),
            },
            Err(_) => Err(ReportParseError::Malformed { line }),
        };

        self.ended = true;
        Some(res)
    }
}

fn separator(input: &str) -> IResult<&str, &str, (&str, ErrorKind)> {
    tag(FIELD_SEPARATOR)(input)
}

fn line_end(input: &str) -> IResult<&str, char, (&str, ErrorKind)> {
    char('\n')(input)
}

fn cdf_row(input: &str) -> IResult<&str, CdfRow, (&str, ErrorKind)> {
    let (input, index) = map_res(digit1, usize::from_str)(input)?;
    let (input, _) = separator(input)?;
    let (input, boundary) = double(input)?;
    let (input, _) = separator(input)?;
    let (input, fraction) = double(input)?;
    let (input, _) = separator(input)?;
    let (input, cumulative) = double(input)?;

    Ok((
        input,
        CdfRow {
            index,
            boundary,
            fraction,
            cumulative,
        },
    ))
}

#[cfg(test)]
mod tests;
