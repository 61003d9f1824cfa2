use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod export;
pub mod filter;

/// One transaction flagged by a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    /// Opaque transaction signature, unique within a sweep result.
    pub id: String,
    /// Currency-formatted amount text (e.g. `$1,234.56`), kept verbatim.
    pub amount: String,
    /// Risk confidence percentage in 0..=100.
    pub score: f64,
    /// Short categorical tag naming the detected pattern.
    pub artifact: String,
}

impl AnomalyRecord {
    /// Check contract invariants for a record received from upstream.
    ///
    /// The service is untrusted, so callers log violations and keep the
    /// record rather than fail the whole sweep.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.id.trim().is_empty() {
            return Err(RecordValidationError::BlankId);
        }
        if !(0.0..=100.0).contains(&self.score) {
            return Err(RecordValidationError::ScoreOutOfRange {
                id: self.id.clone(),
                score: self.score,
            });
        }
        Ok(())
    }
}

/// Contract violations in upstream anomaly records.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordValidationError {
    #[error("anomaly id must not be blank")]
    BlankId,
    #[error("anomaly `{id}` score must be within 0..=100 (got {score})")]
    ScoreOutOfRange { id: String, score: f64 },
}

/// Aggregate counters shown alongside the anomaly list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SweepStats {
    /// Total transactions scanned.
    pub total: u64,
    /// Count of anomalies flagged.
    pub found: u64,
    /// Sum of monetary amounts judged at risk.
    pub exposure: f64,
    /// Mean exposure per anomaly, as reported upstream.
    pub avg: f64,
}

/// Full outcome of one sweep. Anomaly order is as received and carries
/// display priority.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SweepResult {
    pub anomalies: Vec<AnomalyRecord>,
    pub stats: SweepStats,
}

impl SweepResult {
    /// Build a result from the wire response, deriving stats through
    /// [`aggregate`].
    pub fn from_response(response: SweepResponse) -> Self {
        for record in &response.anomalies {
            if let Err(err) = record.validate() {
                warn!(%err, "upstream anomaly violates the sweep contract; keeping it as-is");
            }
        }
        if response.found_count as usize != response.anomalies.len() {
            warn!(
                found_count = response.found_count,
                listed = response.anomalies.len(),
                "upstream foundCount disagrees with the anomaly list length"
            );
        }
        let stats = aggregate(
            response.total_scanned,
            &response.anomalies,
            response.total_exposure,
            response.avg_exposure,
        );
        Self {
            anomalies: response.anomalies,
            stats,
        }
    }
}

/// Wire shape returned by the sweep service for both request modes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepResponse {
    pub anomalies: Vec<AnomalyRecord>,
    pub total_scanned: u64,
    pub found_count: u64,
    #[serde(default)]
    pub total_exposure: Option<f64>,
    #[serde(default)]
    pub avg_exposure: Option<f64>,
}

/// Derive display stats from an upstream response.
///
/// Exposure figures are trusted as given and never recomputed from the
/// currency-formatted amount strings; absent figures default to zero.
pub fn aggregate(
    total: u64,
    anomalies: &[AnomalyRecord],
    total_exposure: Option<f64>,
    avg_exposure: Option<f64>,
) -> SweepStats {
    SweepStats {
        total,
        found: anomalies.len() as u64,
        exposure: total_exposure.unwrap_or(0.0),
        avg: avg_exposure.unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> AnomalyRecord {
        AnomalyRecord {
            id: id.into(),
            amount: "$1,200.00".into(),
            score: 91.0,
            artifact: "SHELL".into(),
        }
    }

    #[test]
    fn aggregate_trusts_upstream_exposure() {
        let anomalies = vec![record("A"), record("B"), record("C")];
        let stats = aggregate(100, &anomalies, Some(5000.0), Some(1666.67));
        assert_eq!(stats.total, 100);
        assert_eq!(stats.found, 3);
        assert!((stats.exposure - 5000.0).abs() < f64::EPSILON);
        assert!((stats.avg - 1666.67).abs() < f64::EPSILON);
    }

    #[test]
    fn aggregate_defaults_missing_exposure_to_zero() {
        let stats = aggregate(50, &[], None, None);
        assert_eq!(stats.total, 50);
        assert_eq!(stats.found, 0);
        assert_eq!(stats.exposure, 0.0);
        assert_eq!(stats.avg, 0.0);
    }

    #[test]
    fn record_validation_rejects_blank_id() {
        let bad = record("  ");
        assert_eq!(bad.validate().unwrap_err(), RecordValidationError::BlankId);
    }

    #[test]
    fn record_validation_rejects_out_of_range_score() {
        let mut bad = record("TXN-9");
        bad.score = 140.0;
        assert!(matches!(
            bad.validate().unwrap_err(),
            RecordValidationError::ScoreOutOfRange { id, score }
                if id == "TXN-9" && (score - 140.0).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn wire_response_decodes_camel_case_fields() {
        let raw = r#"{
            "anomalies": [
                {"id": "TXN-1", "amount": "$42.00", "score": 77, "artifact": "V14"}
            ],
            "totalScanned": 10,
            "foundCount": 1,
            "totalExposure": 42.0,
            "avgExposure": 42.0
        }"#;
        let response: SweepResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.total_scanned, 10);
        assert_eq!(response.found_count, 1);
        assert_eq!(response.anomalies[0].id, "TXN-1");
    }

    #[test]
    fn wire_response_defaults_optional_exposure_fields() {
        let raw = r#"{"anomalies": [], "totalScanned": 5, "foundCount": 0}"#;
        let response: SweepResponse = serde_json::from_str(raw).unwrap();
        assert!(response.total_exposure.is_none());
        assert!(response.avg_exposure.is_none());

        let result = SweepResult::from_response(response);
        assert_eq!(result.stats.exposure, 0.0);
        assert_eq!(result.stats.avg, 0.0);
    }

    #[test]
    fn wire_response_rejects_missing_required_fields() {
        let raw = r#"{"anomalies": []}"#;
        assert!(serde_json::from_str::<SweepResponse>(raw).is_err());
    }

    #[test]
    fn from_response_preserves_anomaly_order() {
        let response = SweepResponse {
            anomalies: vec![record("Z"), record("A"), record("M")],
            total_scanned: 3,
            found_count: 3,
            total_exposure: None,
            avg_exposure: None,
        };
        let result = SweepResult::from_response(response);
        let ids: Vec<_> = result.anomalies.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["Z", "A", "M"]);
        assert_eq!(result.stats.found, 3);
    }

    #[test]
    fn sweep_result_round_trips_through_json() {
        let result = SweepResult {
            anomalies: vec![record("TXN-1"), record("TXN-2")],
            stats: SweepStats {
                total: 20,
                found: 2,
                exposure: 2400.0,
                avg: 1200.0,
            },
        };
        let raw = serde_json::to_string(&result).unwrap();
        let back: SweepResult = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, result);
    }
}
