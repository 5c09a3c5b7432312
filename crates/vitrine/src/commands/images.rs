//! SKU image command handlers.

use tabled::Tabled;

use vitrine_core::notify::messages;
use vitrine_core::{Catalog, DeleteResult, NoticeSet, ProductImage};

use crate::cli::{GlobalOpts, ImagesArgs, ImagesCommand};
use crate::error::CliError;
use crate::{output, toast};

use super::util;

#[derive(Tabled)]
struct ImageRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&ProductImage> for ImageRow {
    fn from(i: &ProductImage) -> Self {
        Self {
            id: i.id.to_string(),
            position: i
                .position
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            url: i.url.clone(),
        }
    }
}

fn id_of(i: &ProductImage) -> String {
    i.id.to_string()
}

pub(super) fn print_list(images: &[ProductImage], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(&global.output, images, |i| ImageRow::from(i), id_of)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    catalog: &Catalog,
    args: ImagesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ImagesCommand::List { product, sku_id } => {
            let mut gallery =
                catalog.images(util::resource_id(&product), util::resource_id(&sku_id));
            let loaded = toast::pending(global, messages::PENDING, gallery.load()).await;
            util::settle(loaded, global)?;
            print_list(gallery.images(), global)
        }

        ImagesCommand::Upload {
            product,
            sku_id,
            file,
        } => {
            let bytes = std::fs::read(&file)?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| CliError::Validation {
                    field: "file".into(),
                    reason: format!("'{}' is not a file", file.display()),
                })?;

            let mut gallery =
                catalog.images(util::resource_id(&product), util::resource_id(&sku_id));
            let uploaded = toast::pending(
                global,
                NoticeSet::SAVE.pending,
                gallery.upload(&file_name, bytes),
            )
            .await;
            let image = util::settle(uploaded, global)?;

            let out = output::render_single(
                &global.output,
                &image,
                |i| {
                    output::detail(&[
                        ("ID", i.id.to_string()),
                        ("URL", i.url.clone()),
                    ])
                },
                id_of,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ImagesCommand::Delete {
            product,
            sku_id,
            image_id,
        } => {
            let mut gallery =
                catalog.images(util::resource_id(&product), util::resource_id(&sku_id));
            util::settle(gallery.load().await, global)?;

            let mut confirm = util::PromptConfirm::new(global);
            let deleted = gallery
                .delete(&util::resource_id(&image_id), &mut confirm)
                .await;
            confirm.check()?;
            if util::settle(deleted, global)? == DeleteResult::Cancelled && !global.quiet {
                eprintln!("Cancelled");
            }
            Ok(())
        }
    }
}
