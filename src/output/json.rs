use crate::model::AuditReport;
use anyhow::Result;

pub fn print_json(report: &AuditReport) -> Result<()> {
    println!("{}", generate_json_string(report)?);
    Ok(())
}

pub(crate) fn generate_json_string(report: &AuditReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
