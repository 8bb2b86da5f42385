use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The long-schema header row could not be located.
    #[error("header row not found (expected columns: {})", required.join(", "))]
    HeaderNotFound { required: Vec<String> },

    #[error("data source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("csv reader failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown country: {0}")]
    UnknownCountry(String),
}

impl ChartError {
    /// Returns `true` for errors that abort loading (no dataset is produced).
    #[must_use]
    pub fn is_fatal_load(&self) -> bool {
        matches!(
            self,
            Self::HeaderNotFound { .. } | Self::SourceUnavailable(_) | Self::Csv(_)
        )
    }

    /// Text shown in place of the loading indicator.
    #[must_use]
    pub fn user_message(&self) -> String {
        format!("Error: {self}")
    }
}
