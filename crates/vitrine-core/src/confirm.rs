// ── Confirmation gate ──
//
// Destructive operations ask before calling the backend. The prompt is
// synchronous and blocking, like a browser `confirm()`.

/// Answers a yes/no question put to the user.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}
