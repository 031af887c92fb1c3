pub mod error;
pub mod metric;
pub mod optimizer;
pub mod evaluator;
pub mod history;
pub mod masking;
pub mod table;
pub mod config;
pub mod session;

/// Identifier of a slice within a case.
pub type SliceId = String;

pub use error::{RegistrationError, Result};
pub use metric::{Direction, Metric, MetricKind};
pub use optimizer::Optimiser;
pub use evaluator::{Evaluation, Evaluator};
pub use history::TransformationHistory;
pub use table::{TransformationRow, TransformationTable};
pub use config::SessionConfig;
pub use session::{CaseData, Frame, Granularity, HistoryPosition, RegistrationSession};
