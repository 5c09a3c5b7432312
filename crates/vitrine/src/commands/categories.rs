//! Category command handlers.

use tabled::Tabled;

use vitrine_core::notify::messages;
use vitrine_core::{Catalog, Category, DeleteResult, NoticeSet};

use crate::cli::{CategoriesArgs, CategoriesCommand, GlobalOpts};
use crate::error::CliError;
use crate::{output, toast};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: id_of(c),
            name: c.name.clone(),
            description: c.description.clone().unwrap_or_default(),
        }
    }
}

fn id_of(c: &Category) -> String {
    c.id.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn detail(c: &Category) -> String {
    output::detail(&[
        ("ID", id_of(c)),
        ("Name", c.name.clone()),
        ("Description", c.description.clone().unwrap_or_default()),
    ])
}

pub(super) fn print_list(items: &[Category], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        items,
        |c| CategoryRow::from(c),
        id_of,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub(super) fn print_one(c: &Category, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, c, detail, id_of)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: CategoriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CategoriesCommand::List => {
            let mut page = catalog.categories();
            let loaded = toast::pending(global, messages::PENDING, page.load()).await;
            util::settle(loaded, global)?;
            print_list(page.items(), global)
        }

        CategoriesCommand::Get { id } => {
            let mut form = catalog.edit_category(util::resource_id(&id));
            util::settle(form.load().await, global)?;
            print_one(form.draft(), global)
        }

        CategoriesCommand::Create { name, description } => {
            let mut form = catalog.new_category();
            form.draft_mut().name = name;
            form.draft_mut().description = description;

            let submitted = toast::pending(global, NoticeSet::SAVE.pending, form.submit()).await;
            let saved = util::settle(submitted, global)?;
            print_one(&saved, global)
        }

        CategoriesCommand::Update {
            id,
            name,
            description,
        } => {
            let mut form = catalog.edit_category(util::resource_id(&id));
            util::settle(form.load().await, global)?;

            let draft = form.draft_mut();
            if let Some(name) = name {
                draft.name = name;
            }
            if description.is_some() {
                draft.description = description;
            }

            let submitted = toast::pending(global, NoticeSet::SAVE.pending, form.submit()).await;
            let saved = util::settle(submitted, global)?;
            print_one(&saved, global)
        }

        CategoriesCommand::Delete { id } => {
            let mut page = catalog.categories();
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
