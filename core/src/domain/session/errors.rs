use thiserror::Error;

use crate::domain::food_analysis::entities::AnalysisError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No image selected")]
    NoImageSelected,

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
