use gmd_model::ContextType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to compile {context_type} exclusion pattern: {source}")]
    ExclusionPattern {
        context_type: ContextType,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("at least 2 columns must be selected for analysis ({selected} selected)")]
    TooFewColumns { selected: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;
