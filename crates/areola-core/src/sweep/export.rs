use chrono::NaiveDate;

use super::AnomalyRecord;

/// Column header of the export format.
pub const CSV_HEADER: &str = "Transaction_Signature,Amount,Risk_Score,Artifact_Pattern";

/// Serialize the anomaly list to the download format, rows in input order.
///
/// The currency symbol and thousands separators are stripped from `amount`
/// for the export only; the display text is never altered. Fields are not
/// quoted, so embedded commas would break a row (known limitation of the
/// format, kept for compatibility with existing consumers).
pub fn encode_csv(anomalies: &[AnomalyRecord]) -> String {
    let mut lines = Vec::with_capacity(anomalies.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for record in anomalies {
        let amount = record.amount.replace('$', "").replace(',', "");
        lines.push(format!(
            "{},{},{}%,{}",
            record.id, amount, record.score, record.artifact
        ));
    }
    lines.join("\n")
}

/// Download filename for a given date: `areola_audit_<ISO-date>.csv`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("areola_audit_{}.csv", date.format("%Y-%m-%d"))
}
