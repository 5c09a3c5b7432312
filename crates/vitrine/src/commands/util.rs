//! Shared helpers for command handlers.

use std::path::Path;

use vitrine_core::{Confirm, Outcome, ResourceId, SkuRow};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::toast;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|_| CliError::NonInteractiveRequiresYes {
            action: message.into(),
        })
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Terminal-backed confirmation gate for core delete operations.
///
/// A prompt that cannot be shown counts as "no"; the reason is kept so
/// the handler can report it after the operation returns.
pub struct PromptConfirm {
    yes: bool,
    error: Option<CliError>,
}

impl PromptConfirm {
    pub fn new(global: &GlobalOpts) -> Self {
        Self {
            yes: global.yes,
            error: None,
        }
    }

    /// Surface a prompt failure, if there was one.
    pub fn check(self) -> Result<(), CliError> {
        self.error.map_or(Ok(()), Err)
    }
}

impl Confirm for PromptConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        match confirm(prompt, self.yes) {
            Ok(answer) => answer,
            Err(e) => {
                self.error = Some(e);
                false
            }
        }
    }
}

/// Show an operation's notice and redirect, then hand back its value.
pub fn settle<T, E>(outcome: Outcome<Result<T, E>>, global: &GlobalOpts) -> Result<T, CliError>
where
    CliError: From<E>,
{
    toast::show_opt(outcome.notice.as_ref(), global);
    if let Some(route) = outcome.redirect.as_ref().filter(|_| !global.quiet) {
        eprintln!("→ {route}  ({})", route.title());
    }
    outcome.value.map_err(CliError::from)
}

pub fn resource_id(raw: &str) -> ResourceId {
    ResourceId::from(raw)
}

/// Read SKU rows for `skus sync`: YAML for `.yaml`/`.yml`, JSON otherwise.
pub fn read_rows_file(path: &Path) -> Result<Vec<SkuRow>, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    if is_yaml {
        Ok(serde_yaml::from_str(&contents)?)
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rows_file_accepts_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("skus.json");
        std::fs::write(&json, r#"[{"id": 10, "product_id": 3, "sku": "CAM-P", "price": "39.90"}]"#)
            .unwrap();
        let rows = read_rows_file(&json).unwrap();
        assert_eq!(rows[0].id, Some(ResourceId::from(10)));
        assert_eq!(rows[0].price, "39.90");

        let yaml = dir.path().join("skus.yml");
        std::fs::write(&yaml, "- sku: CAM-G\n  quantity: \"2\"\n").unwrap();
        let rows = read_rows_file(&yaml).unwrap();
        assert_eq!(rows[0].sku, "CAM-G");
        assert!(rows[0].id.is_none());
    }

    #[test]
    fn yes_flag_skips_the_prompt() {
        assert!(confirm("Deseja realmente excluir CAM-P!", true).unwrap());
    }
}
