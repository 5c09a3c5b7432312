//! Dashboard handler.

use vitrine_core::notify::messages;
use vitrine_core::{Catalog, DashboardSummary};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::{output, toast};

fn detail(s: &DashboardSummary) -> String {
    output::detail(&[
        ("Categories", s.categories.to_string()),
        ("Products", s.products.to_string()),
        ("SKUs", s.skus.to_string()),
    ])
}

pub async fn handle(catalog: &Catalog, global: &GlobalOpts) -> Result<(), CliError> {
    let summary = toast::pending(global, messages::PENDING, catalog.dashboard()).await?;
    let out = output::render_single(&global.output, &summary, detail, |s| {
        format!("{} {} {}", s.categories, s.products, s.skus)
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_lists_the_three_totals() {
        let summary = DashboardSummary {
            categories: 2,
            products: 5,
            skus: 12,
        };
        insta::assert_snapshot!(detail(&summary), @r"
        Categories  2
        Products    5
        SKUs        12
        ");
    }
}
