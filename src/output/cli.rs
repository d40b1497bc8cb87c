use crate::model::{AuditReport, Coordinate, Vulnerability};
use anyhow::Result;
use std::fmt::{self, Write as _};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct VulnRow {
    #[tabled(rename = "Coordinate")]
    coordinate: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "CVE")]
    cve: String,
    #[tabled(rename = "CVSS")]
    score: String,
    #[tabled(rename = "Title")]
    title: String,
}

#[derive(Tabled)]
struct ExcludedRow {
    #[tabled(rename = "Coordinate")]
    coordinate: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "CVE")]
    cve: String,
}

pub fn print_cli_table(report: &AuditReport, quiet: bool) -> Result<()> {
    print!("{}", generate_table_string(report, quiet)?);
    Ok(())
}

/// Renders the report. `quiet` hides non-vulnerable and excluded details.
pub(crate) fn generate_table_string(report: &AuditReport, quiet: bool) -> Result<String> {
    let mut out = String::new();
    write_report(&mut out, report, quiet)?;
    Ok(out)
}

fn write_report(out: &mut String, report: &AuditReport, quiet: bool) -> fmt::Result {
    writeln!(out)?;
    writeln!(
        out,
        "Audit completed at: {}",
        report.audit_time.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out)?;

    if report.is_vulnerable() {
        let rows: Vec<VulnRow> = report
            .coordinates
            .iter()
            .flat_map(|c| c.live_vulnerabilities().map(move |v| vuln_row(c, v)))
            .collect();

        writeln!(out, "Vulnerable packages:")?;
        writeln!(out, "{}", Table::new(rows).with(Style::rounded()))?;
    } else {
        writeln!(out, "No vulnerable packages found.")?;
    }

    if !quiet && report.summary.excluded > 0 {
        let rows: Vec<ExcludedRow> = report
            .coordinates
            .iter()
            .flat_map(|c| {
                c.excluded_vulnerabilities().map(move |v| ExcludedRow {
                    coordinate: truncate(&c.coordinates, 60),
                    id: v.id.clone(),
                    cve: or_dash(&v.cve),
                })
            })
            .collect();

        writeln!(out)?;
        writeln!(out, "Excluded vulnerabilities:")?;
        writeln!(out, "{}", Table::new(rows).with(Style::rounded()))?;
    }

    if !quiet {
        let invalid: Vec<&str> = report
            .coordinates
            .iter()
            .filter(|c| c.invalid_semver)
            .map(|c| c.coordinates.as_str())
            .collect();
        if !invalid.is_empty() {
            writeln!(out)?;
            writeln!(out, "Coordinates without a semantic version:")?;
            for coordinate in invalid {
                writeln!(out, "  {}", coordinate)?;
            }
        }
    }

    writeln!(out)?;
    write_summary(out, report)
}

fn vuln_row(coordinate: &Coordinate, vuln: &Vulnerability) -> VulnRow {
    VulnRow {
        coordinate: truncate(&coordinate.coordinates, 60),
        id: vuln.id.clone(),
        cve: or_dash(&vuln.cve),
        score: vuln.cvss_score.normalize().to_string(),
        title: truncate(&vuln.title, 50),
    }
}

fn write_summary(out: &mut String, report: &AuditReport) -> fmt::Result {
    let summary = &report.summary;
    writeln!(out, "Summary:")?;
    writeln!(out, "  Audited dependencies: {}", summary.audited)?;
    writeln!(out, "  Vulnerable dependencies: {}", summary.vulnerable)?;
    writeln!(
        out,
        "  Vulnerabilities: {} found, {} excluded",
        summary.vulnerabilities, summary.excluded
    )?;
    if summary.invalid_semver > 0 {
        writeln!(out, "  Invalid semver: {}", summary.invalid_semver)?;
    }
    Ok(())
}

fn or_dash(s: &str) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
