//! `vitrine open <path>`: resolve an admin route and show its page.
//!
//! Edit forms and lists are loaded before printing; create forms print
//! their blank draft.

use vitrine_core::notify::messages;
use vitrine_core::{Catalog, EditorMode, Page, Route};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::toast;

use super::{categories, dashboard, images, products, skus, util};

pub async fn handle(catalog: &Catalog, path: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let route = Route::parse(path);
    if route.is_not_found() {
        return Err(CliError::RouteNotFound { path: path.into() });
    }
    if !global.quiet {
        eprintln!("{}  ({})", route.title(), route.path());
    }

    let page = catalog.open(&route);
    tracing::debug!(page = page.kind(), route = %route, "opened page");

    match page {
        Page::Dashboard => dashboard::handle(catalog, global).await,

        Page::CategoryList(mut page) => {
            let loaded = toast::pending(global, messages::PENDING, page.load()).await;
            util::settle(loaded, global)?;
            categories::print_list(page.items(), global)
        }

        Page::CategoryForm(mut form) => {
            if form.mode() == EditorMode::Edit {
                util::settle(form.load().await, global)?;
            }
            categories::print_one(form.draft(), global)
        }

        Page::ProductList(mut page) => {
            let loaded = toast::pending(global, messages::PENDING, page.load()).await;
            util::settle(loaded, global)?;
            products::print_list(page.items(), global)
        }

        Page::ProductForm(mut form) => {
            if form.mode() == EditorMode::Edit {
                util::settle(form.load().await, global)?;
            }
            products::print_one(form.draft(), global)
        }

        Page::SkuEditor(mut editor) => {
            skus::load_editor(&mut editor, global).await?;
            skus::print_rows(&editor, &global.output, global.quiet)
        }

        Page::Images(mut gallery) => {
            let loaded = toast::pending(global, messages::PENDING, gallery.load()).await;
            util::settle(loaded, global)?;
            images::print_list(gallery.images(), global)
        }

        Page::NotFound(path) => Err(CliError::RouteNotFound { path }),
    }
}
