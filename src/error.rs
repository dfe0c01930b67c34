use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnealError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error(
        "Data Mismatch in sample '{sample}': {rects} rects in nodes.json but {elements} elements in elements.json"
    )]
    DataMismatch {
        sample: String,
        elements: usize,
        rects: usize,
    },

    #[error("Evaluation Error in problem '{problem}' at solution {solution}: {reason}")]
    Evaluation {
        problem: String,
        solution: String,
        reason: String,
    },
}

pub type AnnealResult<T> = Result<T, AnnealError>;
