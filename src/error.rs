//! Error types shared by every stage of the report pipeline.

use plotters::drawing::DrawingAreaErrorKind;
use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdaError {
    #[error("Cannot read {}: {source}", path.display())]
    DataAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse CSV {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
    #[error("Rendering failed: {0}")]
    Render(String),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for EdaError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        EdaError::Render(err.to_string())
    }
}

pub type Result<T, E = EdaError> = std::result::Result<T, E>;
