//! Errors raised while seeding.

use std::time::Duration;

use thiserror::Error;

use crate::pipeline::Stage;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database not reachable within {0:?}")]
    ConnectTimeout(Duration),
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("Cannot seed {stage}: no {missing} available")]
    MissingDependency { stage: Stage, missing: &'static str },
    #[error("Write rejected while seeding {stage}: {reason}")]
    WriteRejected { stage: Stage, reason: String },
    #[error("Failed to write {stage}: {source}")]
    Insert {
        stage: Stage,
        #[source]
        source: sqlx::Error,
    },
    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SeedError {
    /// Tags a database error with the stage whose rows it was writing.
    pub fn insert(stage: Stage, source: sqlx::Error) -> Self {
        SeedError::Insert { stage, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_error_names_stage() {
        let err = SeedError::insert(Stage::Services, sqlx::Error::RowNotFound);
        let message = err.to_string();

        assert!(message.starts_with("Failed to write services:"), "{message}");
        assert!(std::error::Error::source(&err).is_some());
    }
}
