// ── Editors ──
//
// Form components: each one owns its editable state and a handle to the
// backend. Operations take `&mut self`, so a single editor never runs
// two mutations at once.

pub mod entity;
pub mod images;
pub mod sku;

use thiserror::Error;

use crate::model::FieldError;
use crate::notify::Notice;
use crate::route::Route;

// ── Outcome ─────────────────────────────────────────────────────────

/// Result of an editor operation plus the effects it asks for.
///
/// The presentation layer shows `notice` (if any) and follows `redirect`
/// (if any). Nothing in core performs either side effect itself.
#[derive(Debug)]
#[must_use]
pub struct Outcome<T> {
    pub value: T,
    pub notice: Option<Notice>,
    pub redirect: Option<Route>,
}

impl<T> Outcome<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            notice: None,
            redirect: None,
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    pub fn with_redirect(mut self, route: Route) -> Self {
        self.redirect = Some(route);
        self
    }
}

// ── LoadState ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

// ── SubmitError ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{} field(s) need attention", .0.len())]
    Invalid(Vec<FieldError>),

    #[error("form has not finished loading")]
    NotLoaded,

    #[error(transparent)]
    Backend(#[from] crate::error::CoreError),
}

impl SubmitError {
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Invalid(errors) => errors,
            _ => &[],
        }
    }
}
