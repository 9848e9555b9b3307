use super::*;

#[test]
fn parse_empty_report() {
    assert_eq!(Ok(vec![]), parse_report(""));
}

#[test]
fn parse_single_line() {
    let rows = parse_report("4000 | 1000.000000 | 0.600000 | 1.000000\n").unwrap();

    assert_eq!(
        vec![CdfRow {
            index: 4000,
            boundary: 1000.0,
            fraction: 0.6,
            cumulative: 1.0,
        }],
        rows
    );
}

#[test]
fn parse_multiple_lines_in_order() {
    let report = "4 | 0.100925 | 0.250000 | 0.250000\n\
                  5 | 0.101158 | 0.000000 | 0.250000\n\
                  6 | 0.101391 | 0.000000 | 0.250000\n";

    let indices: Vec<usize> = parse_report(report)
        .unwrap()
        .into_iter()
        .map(|r| r.index)
        .collect();
    assert_eq!(vec![4, 5, 6], indices);
}

#[test]
fn missing_trailing_newline() {
    assert_eq!(
        Err(ReportParseError::UnterminatedLine),
        parse_report("4000 | 1000.000000 | 0.600000 | 1.000000")
    );
}

#[test]
fn wrong_separator_reports_line() {
    let report = "4 | 0.100925 | 0.250000 | 0.250000\n5, 0.101158, 0.000000, 0.250000\n";

    let mut iter = ReportIterator::new(report);
    assert!(iter.next().unwrap().is_ok());
    assert_eq!(
        Some(Err(ReportParseError::Malformed { line: 1 })),
        iter.next()
    );
    assert_eq!(None, iter.next());
}

#[test]
fn trailing_garbage_on_line() {
    assert_eq!(
        Err(ReportParseError::Malformed { line: 0 }),
        parse_report("4 | 0.100925 | 0.250000 | 0.250000 extra\n")
    );
}

#[test]
fn negative_index_is_malformed() {
    assert_eq!(
        Err(ReportParseError::Malformed { line: 0 }),
        parse_report("-4 | 0.100925 | 0.250000 | 0.250000\n")
    );
}
