//! Benchmark results for Rectified Point Flow and registration baselines,
//! with the filtering and chart models the dashboard renders.

pub mod chart;
pub mod column;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod metric;
pub mod record;
pub mod scene;
pub mod selection;
pub mod table;

pub use chart::{Bar, BarChart, BarGroup};
pub use column::{Cell, Column, TableView};
pub use config::{DefaultsConfig, OutputConfig, OutputFormat, RpfLabConfig, SceneConfig};
pub use dashboard::{
    render_page, ChartSection, CloudView, Notice, Page, PageRequest, PageView, SceneSection,
};
pub use error::{Result, RpfLabError};
pub use metric::Metric;
pub use record::BenchmarkRecord;
pub use scene::{AlignmentSummary, CloudKind, ConceptualScene, Pose};
pub use selection::{SelectOutcome, Selection};
pub use table::MetricsTable;
