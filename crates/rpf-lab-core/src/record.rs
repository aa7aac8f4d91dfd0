use serde::{Deserialize, Serialize};

/// One row of the benchmark table: a (dataset, method) pair and its metrics.
///
/// Field names serialize as the table's column names so JSON output lines up
/// with CSV headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    #[serde(rename = "Dataset")]
    pub dataset: String,
    #[serde(rename = "Method")]
    pub method: String,
    /// Rotation error in degrees
    #[serde(rename = "RE")]
    pub rotation_error_deg: f64,
    /// Translation error in centimeters
    #[serde(rename = "TE")]
    pub translation_error_cm: f64,
    #[serde(rename = "Recall@5°")]
    pub recall_5deg: f64,
    #[serde(rename = "Recall@1cm")]
    pub recall_1cm: f64,
    #[serde(rename = "RMSE")]
    pub rmse: f64,
    #[serde(rename = "Overlap_Ratio")]
    pub overlap_ratio: f64,
}

impl BenchmarkRecord {
    pub fn new(dataset: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            method: method.into(),
            rotation_error_deg: 0.0,
            translation_error_cm: 0.0,
            recall_5deg: 0.0,
            recall_1cm: 0.0,
            rmse: 0.0,
            overlap_ratio: 0.0,
        }
    }

    pub fn with_pose_errors(mut self, re: f64, te: f64) -> Self {
        self.rotation_error_deg = re;
        self.translation_error_cm = te;
        self
    }

    pub fn with_recalls(mut self, recall_5deg: f64, recall_1cm: f64) -> Self {
        self.recall_5deg = recall_5deg;
        self.recall_1cm = recall_1cm;
        self
    }

    pub fn with_rigidity(mut self, rmse: f64, overlap_ratio: f64) -> Self {
        self.rmse = rmse;
        self.overlap_ratio = overlap_ratio;
        self
    }

    pub fn key(&self) -> (&str, &str) {
        (&self.dataset, &self.method)
    }

    pub fn is_rpf(&self) -> bool {
        self.method.starts_with("RPF")
    }
}
