//! Error types for the viewer pipeline.

use thiserror::Error;

/// Everything that can go wrong between credential resolution and rendering.
///
/// All variants are non-fatal: they are surfaced as operator-facing messages
/// and the page degrades (empty table, skipped metric) instead of exiting.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Neither the local credential file nor the environment secret exists.
    #[error(
        "no credential source found: place a service-account file at \
         '{file}' or set the {env} environment variable"
    )]
    NoCredential { file: String, env: String },

    /// A credential source existed but authorization against Google failed.
    #[error("authorization failed: {0:#}")]
    AuthFailure(anyhow::Error),

    /// The requested worksheet name does not exist in the document.
    #[error("worksheet '{0}' not found; check the sheet name")]
    WorksheetNotFound(String),

    /// Network, permission, or malformed-response failure while fetching.
    #[error("failed to load worksheet: {0:#}")]
    LoadFailure(anyhow::Error),

    /// None of the wanted display columns exist in the loaded table.
    #[error("none of the requested columns exist in the worksheet")]
    NoColumnsAvailable,
}
