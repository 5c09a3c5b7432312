// ── Notices ──
//
// Feedback for async operations, returned as values. Core never renders
// them; the presentation layer decides how a pending/success/error
// notice looks (spinner, colored line, toast).

use std::fmt;

use serde::Serialize;
use strum::Display;

/// Fixed user-facing copy, matching the admin UI.
pub mod messages {
    pub const PENDING: &str = "Um momento por favor...";
    pub const SAVED: &str = "Dados salvos com sucesso!";
    pub const REMOVED: &str = "Removido com sucesso!";
    pub const FAILED: &str = "Algo deu errado, tente novamente!";
    pub const REQUIRED: &str = "Campo obrigatório!";
    pub const LOAD_FAILED: &str = "Não foi possível carregar os dados.";
    pub const RESYNC_FAILED: &str = "Dados salvos, mas não foi possível recarregar a lista.";

    /// Confirmation prompt shown before any destructive call.
    pub fn confirm_delete(name: &str) -> String {
        format!("Deseja realmente excluir {name}!")
    }

    pub fn partially_saved(failed: usize, total: usize, names: &str) -> String {
        format!("{failed} de {total} itens não foram salvos: {names}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Pending,
    Success,
    Warning,
    Error,
}

/// A single piece of feedback for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Underlying cause, for logs and verbose output. Never part of the
    /// headline message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            detail: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn with_detail(mut self, detail: impl fmt::Display) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Pending / success / error copy for one kind of operation, in the
/// shape of a promise-bound toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeSet {
    pub pending: &'static str,
    pub success: &'static str,
    pub error: &'static str,
}

impl NoticeSet {
    pub const SAVE: Self = Self {
        pending: messages::PENDING,
        success: messages::SAVED,
        error: messages::FAILED,
    };

    pub const REMOVE: Self = Self {
        pending: messages::PENDING,
        success: messages::REMOVED,
        error: messages::FAILED,
    };

    pub fn pending(&self) -> Notice {
        Notice::new(NoticeLevel::Pending, self.pending)
    }

    /// Settle into a success or error notice. Errors keep the generic
    /// headline and carry the cause as detail.
    pub fn resolve<T, E: fmt::Display>(&self, result: &Result<T, E>) -> Notice {
        match result {
            Ok(_) => Notice::success(self.success),
            Err(e) => Notice::error(self.error).with_detail(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_keeps_generic_error_headline() {
        let failed: Result<(), String> = Err("connection reset".into());
        let notice = NoticeSet::SAVE.resolve(&failed);
        assert!(notice.is_error());
        assert_eq!(notice.message, "Algo deu errado, tente novamente!");
        assert_eq!(notice.detail.as_deref(), Some("connection reset"));
    }

    #[test]
    fn resolve_success_uses_operation_copy() {
        let ok: Result<(), String> = Ok(());
        assert_eq!(
            NoticeSet::REMOVE.resolve(&ok),
            Notice::success("Removido com sucesso!")
        );
        assert_eq!(NoticeSet::REMOVE.pending().level, NoticeLevel::Pending);
    }

    #[test]
    fn confirm_prompt_names_the_item() {
        assert_eq!(
            messages::confirm_delete("CAM-P"),
            "Deseja realmente excluir CAM-P!"
        );
    }
}
