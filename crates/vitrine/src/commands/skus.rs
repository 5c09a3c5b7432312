//! SKU command handlers.
//!
//! Every write goes through the collection editor: load the product's
//! SKUs, change rows, then submit the whole list as one batch. A batch
//! that saves some rows and not others exits with the partial-batch
//! code.

use std::io::IsTerminal;

use dialoguer::{Input, Select};
use serde::Serialize;
use tabled::Tabled;

use vitrine_core::notify::messages;
use vitrine_core::{
    BatchReport, BatchStatus, Catalog, CatalogBackend, DeleteResult, EditorMode, NoticeSet,
    Outcome, RowAction, RowKey, RowOutcome, SkuCollectionEditor, SkuField, SkuRow, SubmitError,
};

use crate::cli::{GlobalOpts, OutputFormat, SkuFieldArgs, SkusArgs, SkusCommand};
use crate::error::CliError;
use crate::{output, toast};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SkuTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Cost")]
    cost_price: String,
    #[tabled(rename = "Sale")]
    sale_price: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: String,
}

impl From<&SkuRow> for SkuTableRow {
    fn from(r: &SkuRow) -> Self {
        Self {
            id: r
                .id
                .as_ref()
                .map_or_else(|| "(new)".into(), ToString::to_string),
            sku: r.sku.clone(),
            cost_price: r.cost_price.clone(),
            sale_price: r.sale_price.clone(),
            price: r.price.clone(),
            quantity: r.quantity.clone(),
        }
    }
}

fn sku_id_of(r: &SkuRow) -> String {
    r.id.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// One line of a batch result, as printed after a submit.
#[derive(Debug, Serialize)]
struct BatchLine {
    sku: String,
    action: RowAction,
    saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<&RowOutcome> for BatchLine {
    fn from(o: &RowOutcome) -> Self {
        Self {
            sku: o.sku.clone(),
            action: o.action,
            saved: o.is_ok(),
            error: o.error.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Tabled)]
struct BatchTableRow {
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Action")]
    action: &'static str,
    #[tabled(rename = "Result")]
    result: String,
}

impl From<&BatchLine> for BatchTableRow {
    fn from(l: &BatchLine) -> Self {
        Self {
            sku: l.sku.clone(),
            action: match l.action {
                RowAction::Create => "create",
                RowAction::Update => "update",
            },
            result: l.error.clone().unwrap_or_else(|| "saved".into()),
        }
    }
}

// ── Batch helpers ───────────────────────────────────────────────────

pub(super) fn print_rows<B: CatalogBackend>(
    editor: &SkuCollectionEditor<B>,
    format: &OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let out = output::render_list(
        format,
        editor.rows(),
        |r| SkuTableRow::from(r),
        sku_id_of,
    )?;
    output::print_output(&out, quiet);
    Ok(())
}

fn print_report(report: &BatchReport, global: &GlobalOpts) -> Result<(), CliError> {
    let lines: Vec<BatchLine> = report.rows.iter().map(BatchLine::from).collect();
    let out = output::render_list(
        &global.output,
        &lines,
        |l| BatchTableRow::from(l),
        |l| l.sku.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Exit status for a finished batch.
fn batch_result(report: &BatchReport) -> Result<(), CliError> {
    match report.status() {
        BatchStatus::Succeeded => Ok(()),
        BatchStatus::Partial { failed, total } => Err(CliError::PartialBatch {
            failed,
            total,
            skus: report
                .failed_rows()
                .map(|r| r.sku.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }),
        BatchStatus::Failed => Err(CliError::BatchFailed {
            first: report
                .failed_rows()
                .find_map(|r| r.error.as_ref().map(ToString::to_string))
                .unwrap_or_default(),
        }),
    }
}

fn finish_batch(
    submitted: Outcome<Result<BatchReport, SubmitError>>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let report = util::settle(submitted, global)?;
    print_report(&report, global)?;
    batch_result(&report)
}

fn apply_fields<B: CatalogBackend>(
    editor: &mut SkuCollectionEditor<B>,
    key: RowKey,
    fields: SkuFieldArgs,
) -> Result<(), CliError> {
    let pairs = [
        (SkuField::Sku, fields.sku),
        (SkuField::CostPrice, fields.cost_price),
        (SkuField::SalePrice, fields.sale_price),
        (SkuField::Price, fields.price),
        (SkuField::Quantity, fields.quantity),
    ];
    for (field, value) in pairs {
        if let Some(value) = value {
            editor.set_field(key, field, value)?;
        }
    }
    Ok(())
}

fn key_for<B: CatalogBackend>(
    editor: &SkuCollectionEditor<B>,
    sku_id: &str,
) -> Result<RowKey, CliError> {
    editor
        .key_for_id(&util::resource_id(sku_id))
        .ok_or_else(|| CliError::NotFound {
            resource_type: "sku".into(),
            identifier: sku_id.into(),
            list_command: format!("skus list {}", editor.product_id()),
        })
}

pub(super) async fn load_editor<B: CatalogBackend>(
    editor: &mut SkuCollectionEditor<B>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let loaded = toast::pending(global, messages::PENDING, editor.load()).await;
    util::settle(loaded, global)
}

async fn submit<B: CatalogBackend>(
    editor: &mut SkuCollectionEditor<B>,
    global: &GlobalOpts,
) -> Outcome<Result<BatchReport, SubmitError>> {
    toast::pending(global, NoticeSet::SAVE.pending, editor.submit()).await
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(catalog: &Catalog, args: SkusArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SkusCommand::List { product } => {
            let mut editor = catalog.sku_editor(util::resource_id(&product), EditorMode::Edit);
            load_editor(&mut editor, global).await?;
            print_rows(&editor, &global.output, global.quiet)
        }

        SkusCommand::Add { product, fields } => {
            let mut editor = catalog.sku_editor(util::resource_id(&product), EditorMode::Edit);
            load_editor(&mut editor, global).await?;

            let key = editor.add_row();
            apply_fields(&mut editor, key, fields)?;
            finish_batch(submit(&mut editor, global).await, global)
        }

        SkusCommand::Set {
            product,
            sku_id,
            fields,
        } => {
            let mut editor = catalog.sku_editor(util::resource_id(&product), EditorMode::Edit);
            load_editor(&mut editor, global).await?;

            let key = key_for(&editor, &sku_id)?;
            apply_fields(&mut editor, key, fields)?;
            finish_batch(submit(&mut editor, global).await, global)
        }

        SkusCommand::Sync { product, from_file } => {
            let incoming = util::read_rows_file(&from_file)?;
            let mut editor = catalog.sku_editor(util::resource_id(&product), EditorMode::Edit);
            load_editor(&mut editor, global).await?;

            for row in incoming {
                let existing = row.id.as_ref().and_then(|id| editor.key_for_id(id));
                match existing.and_then(|key| editor.row_mut(key)) {
                    Some(current) => current.merge(&row),
                    None => {
                        editor.push_row(row);
                    }
                }
            }
            finish_batch(submit(&mut editor, global).await, global)
        }

        SkusCommand::Delete { product, sku_id } => {
            let mut editor = catalog.sku_editor(util::resource_id(&product), EditorMode::Edit);
            load_editor(&mut editor, global).await?;

            let key = key_for(&editor, &sku_id)?;
            let mut confirm = util::PromptConfirm::new(global);
            let deleted = editor.delete_row(key, &mut confirm).await;
            confirm.check()?;
            if util::settle(deleted, global)? == DeleteResult::Cancelled && !global.quiet {
                eprintln!("Cancelled");
            }
            Ok(())
        }

        SkusCommand::Edit { product, new } => {
            if !std::io::stdin().is_terminal() {
                return Err(CliError::NotInteractive {
                    command: "skus edit".into(),
                });
            }
            let mode = if new { EditorMode::Create } else { EditorMode::Edit };
            let mut editor = catalog.sku_editor(util::resource_id(&product), mode);
            load_editor(&mut editor, global).await?;
            edit_loop(&mut editor, global).await
        }
    }
}

// ── Interactive editor ──────────────────────────────────────────────

const MENU: &[&str] = &["Edit a row", "Add a row", "Delete a row", "Save", "Quit"];

async fn edit_loop<B: CatalogBackend>(
    editor: &mut SkuCollectionEditor<B>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    loop {
        eprintln!("\n{}", editor.product().name);
        print_rows(editor, &OutputFormat::Table, false)?;

        let choice = Select::new()
            .with_prompt("Action")
            .items(MENU)
            .default(0)
            .interact()
            .map_err(util::prompt_err)?;

        match choice {
            0 => {
                if let Some(key) = pick_row(editor, "Row to edit")? {
                    edit_row(editor, key)?;
                }
            }
            1 => {
                let key = editor.add_row();
                edit_row(editor, key)?;
            }
            2 => {
                if let Some(key) = pick_row(editor, "Row to delete")? {
                    let mut confirm = util::PromptConfirm::new(global);
                    let deleted = editor.delete_row(key, &mut confirm).await;
                    confirm.check()?;
                    if let Err(e) = util::settle(deleted, global) {
                        eprintln!("{:?}", miette::Report::new(e));
                    }
                }
            }
            3 => {
                // Failed rows stay in the list with their edits, so the
                // loop carries on instead of exiting.
                let submitted = submit(editor, global).await;
                match util::settle(submitted, global) {
                    Ok(report) => print_report(&report, global)?,
                    Err(e) => eprintln!("{:?}", miette::Report::new(e)),
                }
            }
            _ => return Ok(()),
        }
    }
}

fn pick_row<B: CatalogBackend>(
    editor: &SkuCollectionEditor<B>,
    prompt: &str,
) -> Result<Option<RowKey>, CliError> {
    if editor.rows().is_empty() {
        eprintln!("No rows");
        return Ok(None);
    }
    let labels: Vec<String> = editor
        .rows()
        .iter()
        .map(|r| {
            let id = r.id.as_ref().map_or_else(|| "new".into(), ToString::to_string);
            format!("{} ({id})  {}  x{}", r.sku, r.price, r.quantity)
        })
        .collect();

    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()
        .map_err(util::prompt_err)?;
    Ok(editor.rows().get(index).map(|r| r.key))
}

fn edit_row<B: CatalogBackend>(
    editor: &mut SkuCollectionEditor<B>,
    key: RowKey,
) -> Result<(), CliError> {
    for field in SkuField::ALL {
        let current = editor
            .row(key)
            .map(|r| r.get(field).to_owned())
            .unwrap_or_default();
        let value: String = Input::new()
            .with_prompt(field.label())
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
            .map_err(util::prompt_err)?;
        editor.set_field(key, field, value)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use vitrine_core::CoreError;

    fn outcome(sku: &str, action: RowAction, error: Option<CoreError>) -> RowOutcome {
        RowOutcome {
            key: RowKey::new(),
            sku: sku.into(),
            action,
            error,
        }
    }

    fn rejected() -> Option<CoreError> {
        Some(CoreError::Api {
            message: "sku already taken".into(),
            status: Some(422),
        })
    }

    #[test]
    fn partial_batch_names_the_failed_rows() {
        let report = BatchReport {
            rows: vec![
                outcome("CAM-P", RowAction::Update, None),
                outcome("CAM-M", RowAction::Update, rejected()),
                outcome("CAM-G", RowAction::Create, None),
            ],
            refresh_error: None,
        };
        let err = batch_result(&report).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::PARTIAL);
        assert!(matches!(
            err,
            CliError::PartialBatch { failed: 1, total: 3, ref skus } if skus == "CAM-M"
        ));
    }

    #[test]
    fn failed_batch_reports_the_first_error() {
        let report = BatchReport {
            rows: vec![
                outcome("CAM-P", RowAction::Create, rejected()),
                outcome("CAM-M", RowAction::Create, Some(CoreError::Timeout)),
            ],
            refresh_error: None,
        };
        let err = batch_result(&report).unwrap_err();
        assert!(matches!(err, CliError::BatchFailed { ref first } if first.contains("sku already taken")));
    }

    #[test]
    fn empty_and_clean_batches_succeed() {
        let empty = BatchReport {
            rows: Vec::new(),
            refresh_error: None,
        };
        assert!(batch_result(&empty).is_ok());

        let clean = BatchReport {
            rows: vec![outcome("CAM-P", RowAction::Update, None)],
            refresh_error: Some(CoreError::Timeout),
        };
        assert!(batch_result(&clean).is_ok());
    }

    #[test]
    fn batch_lines_serialize_action_and_error() {
        let line = BatchLine::from(&outcome("CAM-M", RowAction::Create, rejected()));
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["action"], "create");
        assert_eq!(json["saved"], false);
        assert_eq!(json["error"], "API error: sku already taken");
    }
}
