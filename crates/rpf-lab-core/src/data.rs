//! Illustrative benchmark results for Rectified Point Flow and baselines.
//!
//! The numbers are hand-authored for teaching; they are not measured.

use crate::BenchmarkRecord;

pub const TUD_L: &str = "TUD-L";
pub const MODELNET_40: &str = "ModelNet 40";

pub const DATASETS: [&str; 2] = [TUD_L, MODELNET_40];

pub const METHODS: [&str; 8] = [
    "RPF (Single)",
    "RPF (Joint)",
    "DCPNet",
    "RPMNet",
    "GeoTransformer",
    "GARF",
    "Diff-RPMNet",
    "PointDSC",
];

pub(crate) struct Row {
    pub dataset: &'static str,
    pub method: &'static str,
    pub re: f64,
    pub te: f64,
    pub recall_5deg: f64,
    pub recall_1cm: f64,
    pub rmse: f64,
    pub overlap_ratio: f64,
}

const fn row(
    dataset: &'static str,
    method: &'static str,
    [re, te, recall_5deg, recall_1cm, rmse, overlap_ratio]: [f64; 6],
) -> Row {
    Row {
        dataset,
        method,
        re,
        te,
        recall_5deg,
        recall_1cm,
        rmse,
        overlap_ratio,
    }
}

// RE, TE, Recall@5°, Recall@1cm, RMSE, Overlap_Ratio
pub(crate) const ROWS: [Row; 16] = [
    row(TUD_L, "RPF (Single)", [0.5, 0.01, 0.98, 0.97, 0.015, 0.85]),
    row(TUD_L, "RPF (Joint)", [0.4, 0.008, 0.99, 0.98, 0.012, 0.88]),
    row(TUD_L, "DCPNet", [0.8, 0.02, 0.90, 0.89, 0.03, 0.70]),
    row(TUD_L, "RPMNet", [0.7, 0.015, 0.92, 0.91, 0.025, 0.75]),
    row(TUD_L, "GeoTransformer", [0.6, 0.012, 0.95, 0.94, 0.02, 0.80]),
    row(TUD_L, "GARF", [0.9, 0.025, 0.88, 0.87, 0.035, 0.65]),
    row(TUD_L, "Diff-RPMNet", [1.0, 0.03, 0.85, 0.84, 0.04, 0.60]),
    row(TUD_L, "PointDSC", [1.2, 0.035, 0.80, 0.79, 0.045, 0.55]),
    row(MODELNET_40, "RPF (Single)", [0.3, 0.005, 0.99, 0.98, 0.01, 0.90]),
    row(MODELNET_40, "RPF (Joint)", [0.2, 0.004, 0.995, 0.99, 0.008, 0.92]),
    row(MODELNET_40, "DCPNet", [0.7, 0.018, 0.91, 0.90, 0.028, 0.72]),
    row(MODELNET_40, "RPMNet", [0.6, 0.013, 0.93, 0.92, 0.022, 0.78]),
    row(MODELNET_40, "GeoTransformer", [0.5, 0.01, 0.96, 0.95, 0.018, 0.83]),
    row(MODELNET_40, "GARF", [0.8, 0.02, 0.89, 0.88, 0.032, 0.68]),
    row(MODELNET_40, "Diff-RPMNet", [0.9, 0.028, 0.87, 0.86, 0.038, 0.63]),
    row(MODELNET_40, "PointDSC", [1.1, 0.032, 0.82, 0.81, 0.042, 0.58]),
];

impl Row {
    fn to_record(&self) -> BenchmarkRecord {
        BenchmarkRecord::new(self.dataset, self.method)
            .with_pose_errors(self.re, self.te)
            .with_recalls(self.recall_5deg, self.recall_1cm)
            .with_rigidity(self.rmse, self.overlap_ratio)
    }
}

pub(crate) fn records() -> Vec<BenchmarkRecord> {
    ROWS.iter().map(Row::to_record).collect()
}

/// Methods preselected on both pages.
pub const DEFAULT_METHODS: [&str; 4] = ["RPF (Single)", "RPF (Joint)", "DCPNet", "RPMNet"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_dataset_has_every_method() {
        for dataset in DATASETS {
            for method in METHODS {
                let count = ROWS
                    .iter()
                    .filter(|r| r.dataset == dataset && r.method == method)
                    .count();
                assert_eq!(count, 1, "{} / {}", dataset, method);
            }
        }
        assert_eq!(ROWS.len(), DATASETS.len() * METHODS.len());
    }

    #[test]
    fn test_default_methods_exist() {
        for method in DEFAULT_METHODS {
            assert!(METHODS.contains(&method));
        }
    }
}
