// ── Read-mostly pages ──
//
// List pages and the dashboard. They load data and offer deletes; all
// editing happens in `crate::editor`.

pub mod dashboard;
pub mod list;
