//! Product command handlers.

use tabled::Tabled;

use vitrine_core::notify::messages;
use vitrine_core::{Catalog, DeleteResult, NoticeSet, Product};

use crate::cli::{GlobalOpts, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::{output, toast};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: id_of(p),
            name: p.name.clone(),
            category: p
                .category_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            description: p.description.clone().unwrap_or_default(),
        }
    }
}

fn id_of(p: &Product) -> String {
    p.id.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn detail(p: &Product) -> String {
    output::detail(&[
        ("ID", id_of(p)),
        ("Name", p.name.clone()),
        (
            "Category",
            p.category_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        ),
        ("Description", p.description.clone().unwrap_or_default()),
        ("SKUs", p.skus.len().to_string()),
    ])
}

pub(super) fn print_list(items: &[Product], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        items,
        |p| ProductRow::from(p),
        id_of,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub(super) fn print_one(p: &Product, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, p, detail, id_of)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProductsCommand::List => {
            let mut page = catalog.products();
            let loaded = toast::pending(global, messages::PENDING, page.load()).await;
            util::settle(loaded, global)?;
            print_list(page.items(), global)
        }

        ProductsCommand::Get { id } => {
            let mut form = catalog.edit_product(util::resource_id(&id));
            util::settle(form.load().await, global)?;
            print_one(form.draft(), global)
        }

        ProductsCommand::Create {
            name,
            description,
            category,
        } => {
            let mut form = catalog.new_product();
            let draft = form.draft_mut();
            draft.name = name;
            draft.description = description;
            draft.category_id = category.as_deref().map(util::resource_id);

            let submitted = toast::pending(global, NoticeSet::SAVE.pending, form.submit()).await;
            let saved = util::settle(submitted, global)?;
            print_one(&saved, global)
        }

        ProductsCommand::Update {
            id,
            name,
            description,
            category,
        } => {
            let mut form = catalog.edit_product(util::resource_id(&id));
            util::settle(form.load().await, global)?;

            let draft = form.draft_mut();
            if let Some(name) = name {
                draft.name = name;
            }
            if description.is_some() {
                draft.description = description;
            }
            if let Some(category) = category {
                draft.category_id = Some(util::resource_id(&category));
            }

            let submitted = toast::pending(global, NoticeSet::SAVE.pending, form.submit()).await;
            let saved = util::settle(submitted, global)?;
            print_one(&saved, global)
        }

        ProductsCommand::Delete { id } => {
            let mut page = catalog.products();
            util::settle(page.load().await, global)?;

            let mut confirm = util::PromptConfirm::new(global);
            let deleted = page.delete(&util::resource_id(&id), &mut confirm).await;
            confirm.check()?;
            if util::settle(deleted, global)? == DeleteResult::Cancelled && !global.quiet {
                eprintln!("Cancelled");
            }
            Ok(())
        }
    }
}
