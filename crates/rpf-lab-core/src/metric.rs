use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BenchmarkRecord, RpfLabError};

/// A numeric column that can be plotted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "RE")]
    RotationError,
    #[serde(rename = "TE")]
    TranslationError,
    #[serde(rename = "Recall@5°")]
    Recall5Deg,
    #[serde(rename = "Recall@1cm")]
    Recall1Cm,
    #[serde(rename = "RMSE")]
    Rmse,
    #[serde(rename = "Overlap_Ratio")]
    OverlapRatio,
}

impl Metric {
    /// Column name as it appears in the table schema.
    pub fn column_name(&self) -> &'static str {
        match self {
            Metric::RotationError => "RE",
            Metric::TranslationError => "TE",
            Metric::Recall5Deg => "Recall@5°",
            Metric::Recall1Cm => "Recall@1cm",
            Metric::Rmse => "RMSE",
            Metric::OverlapRatio => "Overlap_Ratio",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::RotationError => "Rotation Error (RE)",
            Metric::TranslationError => "Translation Error (TE)",
            Metric::Recall5Deg => "Recall@5°",
            Metric::Recall1Cm => "Recall@1cm",
            Metric::Rmse => "Root Mean Square Error (RMSE)",
            Metric::OverlapRatio => "Overlap Ratio",
        }
    }

    /// Axis label used on charts.
    pub fn axis_label(&self) -> &'static str {
        match self {
            Metric::OverlapRatio => "Overlap Ratio",
            _ => self.column_name(),
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Metric::RotationError => Some("deg"),
            Metric::TranslationError => Some("cm"),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Metric::RotationError => {
                "Angular difference in degrees between predicted and ground-truth rotations. \
                 RE = arccos((trace(R_pred^T R_gt) - 1) / 2) * 180 / pi."
            }
            Metric::TranslationError => {
                "Euclidean distance in centimeters between predicted and ground-truth \
                 translations. TE = ||t_pred - t_gt||_2."
            }
            Metric::Recall5Deg => {
                "Share of registrations whose rotation error is at or below 5 degrees."
            }
            Metric::Recall1Cm => {
                "Share of registrations whose translation error is at or below 1 cm."
            }
            Metric::Rmse => {
                "Average magnitude of the error between transformed and ground-truth point \
                 positions. RMSE = sqrt(1/N * sum ||p_transformed - p_groundtruth||^2)."
            }
            Metric::OverlapRatio => {
                "Proportion of points in one cloud that lie within a distance threshold of \
                 their counterpart in the other cloud after registration."
            }
        }
    }

    pub fn lower_is_better(&self) -> bool {
        matches!(
            self,
            Metric::RotationError | Metric::TranslationError | Metric::Rmse
        )
    }

    /// Inclusive range every table value of this metric must fall in.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Metric::RotationError | Metric::TranslationError | Metric::Rmse => (0.0, f64::MAX),
            Metric::Recall5Deg | Metric::Recall1Cm => (0.0, 100.0),
            Metric::OverlapRatio => (0.0, 1.0),
        }
    }

    pub fn value(&self, record: &BenchmarkRecord) -> f64 {
        match self {
            Metric::RotationError => record.rotation_error_deg,
            Metric::TranslationError => record.translation_error_cm,
            Metric::Recall5Deg => record.recall_5deg,
            Metric::Recall1Cm => record.recall_1cm,
            Metric::Rmse => record.rmse,
            Metric::OverlapRatio => record.overlap_ratio,
        }
    }

    pub fn all() -> &'static [Metric] {
        &[
            Metric::RotationError,
            Metric::TranslationError,
            Metric::Recall5Deg,
            Metric::Recall1Cm,
            Metric::Rmse,
            Metric::OverlapRatio,
        ]
    }

    /// Metrics offered on the comparison page.
    pub fn pairwise() -> &'static [Metric] {
        &[
            Metric::RotationError,
            Metric::TranslationError,
            Metric::Recall5Deg,
            Metric::Recall1Cm,
        ]
    }

    /// Metrics plotted on the rigidity page.
    pub fn rigidity() -> &'static [Metric] {
        &[Metric::Rmse, Metric::OverlapRatio]
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Metric {
    type Err = RpfLabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        let metric = match name.as_str() {
            "re" => Metric::RotationError,
            "te" => Metric::TranslationError,
            "recall@5°" | "recall@5" | "recall@5deg" => Metric::Recall5Deg,
            "recall@1cm" => Metric::Recall1Cm,
            "rmse" => Metric::Rmse,
            "overlap_ratio" | "overlap" => Metric::OverlapRatio,
            _ => return Err(RpfLabError::UnknownMetric(s.to_string())),
        };
        Ok(metric)
    }
}
