//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `SubmitError` into user-facing errors with help
//! text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use vitrine_config::ConfigError;
use vitrine_core::{CoreError, FieldError, SubmitError};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    /// Batch submit where some rows saved and some did not.
    pub const PARTIAL: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the catalog API at {url}")]
    #[diagnostic(
        code(vitrine::connection_failed),
        help(
            "Check that the API is running and the URL is right.\n\
             Set it with: vitrine config set api_url <url>  (or --api-url)"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(vitrine::timeout),
        help("Increase the timeout with --timeout or check the API's responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(vitrine::not_found),
        help("Run: vitrine {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("No page at route '{path}'")]
    #[diagnostic(
        code(vitrine::route_not_found),
        help(
            "Known routes: /, /categories, /categories/new, /categories/:id/edit,\n\
             /products, /products/new, /products/:id/edit, /products/:id/skus,\n\
             /products/:id/skus/:idsku/images"
        )
    )]
    RouteNotFound { path: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    #[diagnostic(code(vitrine::api_error))]
    ApiError {
        status: Option<u16>,
        message: String,
    },

    // ── Batch submit ─────────────────────────────────────────────────
    #[error("{failed} of {total} SKUs were not saved: {skus}")]
    #[diagnostic(
        code(vitrine::partial_batch),
        help("The other rows were saved. Fix the failed rows and run the command again.")
    )]
    PartialBatch {
        failed: usize,
        total: usize,
        skus: String,
    },

    #[error("No SKU could be saved")]
    #[diagnostic(code(vitrine::batch_failed), help("First failure: {first}"))]
    BatchFailed { first: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vitrine::validation))]
    Validation { field: String, reason: String },

    #[error("{} field(s) failed validation", .errors.len())]
    #[diagnostic(code(vitrine::invalid_form))]
    InvalidForm {
        errors: Vec<FieldError>,
        #[help]
        details: String,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(vitrine::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: vitrine config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No catalog API configured")]
    #[diagnostic(
        code(vitrine::no_config),
        help(
            "Create a profile with: vitrine config init\n\
             or pass --api-url. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(vitrine::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(vitrine::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("'{command}' needs an interactive terminal")]
    #[diagnostic(
        code(vitrine::not_interactive),
        help("Use 'vitrine skus add', 'skus set' or 'skus sync' from scripts.")
    )]
    NotInteractive { command: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(vitrine::json), help("Check the file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    #[diagnostic(code(vitrine::yaml), help("Check the file contents and try again."))]
    Yaml(#[from] serde_yaml::Error),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } | Self::RouteNotFound { .. } => exit_code::NOT_FOUND,
            Self::PartialBatch { .. } => exit_code::PARTIAL,
            Self::Validation { .. }
            | Self::InvalidForm { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::NotInteractive { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: list_command_for(&entity_type).into(),
                resource_type: entity_type,
                identifier,
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Api { message, status } => CliError::ApiError { status, message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                status: None,
                message,
            },
        }
    }
}

impl From<SubmitError> for CliError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(errors) => CliError::InvalidForm {
                details: format_field_errors(&errors),
                errors,
            },
            SubmitError::NotLoaded => CliError::Validation {
                field: "form".into(),
                reason: "form has not finished loading".into(),
            },
            SubmitError::Backend(e) => e.into(),
        }
    }
}

fn list_command_for(entity_type: &str) -> &'static str {
    match entity_type {
        "category" => "categories list",
        "sku" | "row" => "skus list <product>",
        "image" => "images list <product> <sku>",
        _ => "products list",
    }
}
