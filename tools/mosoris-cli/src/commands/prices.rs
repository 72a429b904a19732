//! Line and subtotal price reconciliation.

use anyhow::Result;
use mosoris_commerce::cart::{PriceDisplay, PriceReconciler, PricingConfig};
use mosoris_commerce::format::MoneyFormatter;
use serde::Serialize;

use super::PricesArgs;
use crate::context::Context;
use crate::output::{struck, tree_prefix};

const COLUMN_WIDTHS: [usize; 3] = [40, 16, 16];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LinePrice {
    id: String,
    depth: usize,
    price: PriceDisplay,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PriceReport {
    lines: Vec<LinePrice>,
    subtotal: PriceDisplay,
    discount_codes: Vec<String>,
}

/// Current price, or a dash when the backend sent none.
fn current_cell(price: &PriceDisplay, formatter: &MoneyFormatter) -> String {
    price
        .current()
        .map(|m| formatter.format(m))
        .unwrap_or_else(|| "–".to_string())
}

fn original_cell(price: &PriceDisplay, formatter: &MoneyFormatter) -> String {
    price
        .original()
        .map(|m| struck(&formatter.format(m)))
        .unwrap_or_default()
}

/// Run the prices command.
pub fn run(args: PricesArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.read_cart(&args.snapshot)?;
    let formatter = ctx.config.formatter()?;
    let reconciler = if args.strict_currency {
        PriceReconciler::new(PricingConfig {
            strict_currency: true,
        })
    } else {
        ctx.config.reconciler()
    };

    let tree = cart.line_tree();
    let walked = tree.walk();

    let report = PriceReport {
        lines: walked
            .iter()
            .map(|(depth, line)| LinePrice {
                id: line.id.to_string(),
                depth: *depth,
                price: line.price(&reconciler),
            })
            .collect(),
        subtotal: cart.subtotal_price(&reconciler),
        discount_codes: cart
            .applicable_discount_codes()
            .into_iter()
            .map(str::to_string)
            .collect(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header(&format!("Prices for cart {}", cart.id));
    ctx.output.table_row(&["Line", "Price", "Before discount"], &COLUMN_WIDTHS);

    for ((_, line), entry) in walked.iter().zip(&report.lines) {
        let label = format!("{}{}", tree_prefix(entry.depth), line.merchandise.product.handle);
        let current = current_cell(&entry.price, &formatter);
        let original = original_cell(&entry.price, &formatter);
        ctx.output.table_row(
            &[label.as_str(), current.as_str(), original.as_str()],
            &COLUMN_WIDTHS,
        );
    }

    ctx.output.header("Subtotal");
    ctx.output.kv("current", &current_cell(&report.subtotal, &formatter));
    if report.subtotal.has_comparison() {
        ctx.output
            .kv("before discount", &original_cell(&report.subtotal, &formatter));
        if let Some(savings) = report.subtotal.savings() {
            ctx.output.kv("savings", &formatter.format(&savings));
        }
    }

    if !report.discount_codes.is_empty() {
        ctx.output.header("Discount codes");
        for code in &report.discount_codes {
            ctx.output.list_item(code);
        }
    }

    if !cart.applied_gift_cards.is_empty() {
        ctx.output.header("Gift cards");
        for card in &cart.applied_gift_cards {
            ctx.output.list_item(&format!(
                "{} ({})",
                card.masked_code(),
                formatter.format(&card.amount_used)
            ));
        }
    }

    Ok(())
}
