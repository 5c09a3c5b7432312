//! Notice rendering for the terminal.
//!
//! A spinner stands in for the pending notice while an operation runs;
//! the settled notice is printed to stderr as one colored line.

use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use vitrine_core::{Notice, NoticeLevel};

use crate::cli::GlobalOpts;
use crate::output;

/// Run `fut` behind a spinner showing `pending`.
///
/// The spinner only appears on an interactive stderr and never in quiet
/// mode.
pub async fn pending<F: Future>(global: &GlobalOpts, pending: &str, fut: F) -> F::Output {
    let spinner = (!global.quiet && std::io::stderr().is_terminal()).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(pending.to_owned());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    });

    let out = fut.await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    out
}

/// Print a settled notice. Errors are always shown; everything else
/// respects `--quiet`. `detail` is only printed with `-v`.
pub fn show(notice: &Notice, global: &GlobalOpts) {
    if global.quiet && !notice.is_error() {
        return;
    }
    let color = output::should_color(&global.color);
    let (mark, line) = match notice.level {
        NoticeLevel::Success => ("✓", paint(&notice.message, color, |s| s.green().to_string())),
        NoticeLevel::Warning => ("!", paint(&notice.message, color, |s| s.yellow().to_string())),
        NoticeLevel::Error => ("✗", paint(&notice.message, color, |s| s.red().to_string())),
        NoticeLevel::Pending => ("…", paint(&notice.message, color, |s| s.dimmed().to_string())),
    };
    eprintln!("{mark} {line}");

    if let Some(detail) = notice.detail.as_ref().filter(|_| global.verbose > 0) {
        eprintln!("  {}", paint(detail, color, |s| s.dimmed().to_string()));
    }
}

/// Print an optional notice.
pub fn show_opt(notice: Option<&Notice>, global: &GlobalOpts) {
    if let Some(notice) = notice {
        show(notice, global);
    }
}

fn paint(text: &str, color: bool, style: impl Fn(&str) -> String) -> String {
    if color { style(text) } else { text.to_owned() }
}
