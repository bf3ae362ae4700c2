use crate::dataset::{validate_jsonl, ValidationReport};
use anyhow::Result;
use colored::*;
use std::io::Write;
use std::path::Path;

/// Render a report: one line per rejected record, then a summary line.
pub fn print_report<W: Write>(out: &mut W, report: &ValidationReport) -> std::io::Result<()> {
    for failure in &report.failures {
        writeln!(
            out,
            "{} line {}: {}",
            "[Invalid]".red().bold(),
            failure.line,
            failure.reason
        )?;
    }
    if report.is_valid() {
        writeln!(
            out,
            "{} total={}",
            "All samples are valid.".green(),
            report.total
        )
    } else {
        writeln!(
            out,
            "{} total={}",
            format!("{} invalid samples found.", report.invalid()).as_str().yellow(),
            report.total
        )
    }
}

/// Check a JSONL file, print the report and fail when any record is invalid.
pub fn validate_file(path: &Path) -> Result<ValidationReport> {
    let report = validate_jsonl(path)?;
    print_report(&mut std::io::stdout().lock(), &report)?;
    if !report.is_valid() {
        anyhow::bail!(
            "{} of {} records in {} failed validation",
            report.invalid(),
            report.total,
            path.display()
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::LineFailure;
    use pretty_assertions::assert_eq;

    fn render(report: &ValidationReport) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        print_report(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_valid_report_summary() {
        let report = ValidationReport {
            total: 3,
            failures: vec![],
        };
        assert_eq!(render(&report), "All samples are valid. total=3\n");
    }

    #[test]
    fn test_invalid_report_lists_lines() {
        let report = ValidationReport {
            total: 4,
            failures: vec![
                LineFailure {
                    line: 2,
                    reason: "invalid JSON: EOF".to_string(),
                },
                LineFailure {
                    line: 4,
                    reason: "1 schema violation(s): output: field required".to_string(),
                },
            ],
        };
        assert_eq!(
            render(&report),
            "[Invalid] line 2: invalid JSON: EOF\n\
             [Invalid] line 4: 1 schema violation(s): output: field required\n\
             2 invalid samples found. total=4\n"
        );
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.jsonl");
        std::fs::write(&path, "{}\n").unwrap();
        assert!(validate_file(&path).is_err());
    }
}
