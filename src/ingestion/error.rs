use thiserror::Error;

use crate::structures::GraphError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: GraphError,
    },
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}
