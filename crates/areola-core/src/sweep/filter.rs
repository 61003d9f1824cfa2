use super::AnomalyRecord;

/// Case-insensitive substring filter over signature, amount text, and
/// artifact tag.
///
/// Matching runs on the raw field text, currency symbols and punctuation
/// included, so `$1,200` and `1200` are distinct queries. An empty query
/// keeps every record in its original order.
pub fn filter(records: &[AnomalyRecord], query: &str) -> Vec<AnomalyRecord> {
    if query.is_empty() {
        return records.to_vec();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record.id.to_lowercase().contains(&needle)
                || record.amount.to_lowercase().contains(&needle)
                || record.artifact.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
