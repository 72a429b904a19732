//! Line tree rendering.

use anyhow::Result;
use console::style;
use mosoris_commerce::cart::{CartLine, QuantityControls};
use mosoris_commerce::catalog::{CatalogConfig, SizeChoice};
use serde::Serialize;

use super::TreeArgs;
use crate::context::Context;
use crate::output::{pending_badge, tree_prefix};

/// One rendered line.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TreeNode {
    id: String,
    #[serde(skip)]
    short_id: String,
    depth: usize,
    title: String,
    quantity: u32,
    url: String,
    optimistic: bool,
    controls: QuantityControls,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sizes: Vec<SizeChoice>,
}

impl TreeNode {
    fn new(depth: usize, line: &CartLine, catalog: &CatalogConfig, with_sizes: bool) -> Self {
        let sizes = if with_sizes {
            catalog.size_swap_choices(
                &line.merchandise.id,
                &line.merchandise.selected_options,
                &line.merchandise.product.variants.nodes,
            )
        } else {
            Vec::new()
        };

        Self {
            id: line.id.to_string(),
            short_id: line.id.short().to_string(),
            depth,
            title: line_title(line, catalog),
            quantity: line.quantity,
            url: line.variant_url(),
            optimistic: line.is_optimistic,
            controls: QuantityControls::for_line(line),
            sizes,
        }
    }
}

/// Product title followed by the labelled non-size options.
fn line_title(line: &CartLine, catalog: &CatalogConfig) -> String {
    let product = &line.merchandise.product;
    let name = if product.title.is_empty() {
        product.handle.as_str()
    } else {
        product.title.as_str()
    };

    let options: Vec<String> = catalog
        .non_size_options(&line.merchandise.selected_options)
        .into_iter()
        .map(|o| format!("{}: {}", catalog.label(&o.name), o.value))
        .collect();

    let size = line
        .merchandise
        .selected_options
        .iter()
        .find(|o| catalog.is_size_option(&o.name));

    let mut title = name.to_string();
    if let Some(size) = size {
        title.push_str(&format!(" ({})", size.value));
    }
    if !options.is_empty() {
        title.push_str(&format!(" [{}]", options.join(", ")));
    }
    title
}

fn controls_summary(controls: &QuantityControls) -> String {
    let mut buttons = Vec::new();
    if controls.can_decrease {
        buttons.push(format!("-→{}", controls.decrease_to));
    }
    if controls.can_increase {
        buttons.push(format!("+→{}", controls.increase_to));
    }
    if controls.can_remove {
        buttons.push("remove".to_string());
    }
    buttons.join(" ")
}

fn sizes_summary(sizes: &[SizeChoice]) -> String {
    sizes
        .iter()
        .map(|s| match (s.selected, s.available) {
            (true, _) => format!("[{}]", s.size),
            (false, true) => s.size.clone(),
            (false, false) => format!("{} (sold out)", s.size),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run the tree command.
pub fn run(args: TreeArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.read_cart(&args.snapshot)?;
    let tree = cart.line_tree();
    let catalog = &ctx.config.catalog;

    let nodes: Vec<TreeNode> = tree
        .walk()
        .into_iter()
        .map(|(depth, line)| TreeNode::new(depth, line, catalog, args.sizes))
        .collect();

    let orphaned = tree.orphaned_parent_ids();

    if ctx.output.is_json() {
        ctx.output.json(&nodes);
        return Ok(());
    }

    ctx.output.header(&format!("Cart {}", cart.id));
    if nodes.is_empty() {
        ctx.output.info("The cart is empty");
        return Ok(());
    }

    for node in &nodes {
        println!(
            "  {}{} ×{} {} {}",
            tree_prefix(node.depth),
            node.title,
            node.quantity,
            style(format!("#{}", node.short_id)).dim(),
            pending_badge(node.optimistic)
        );
        ctx.output.kv("url", &node.url);
        let controls = controls_summary(&node.controls);
        if !controls.is_empty() {
            ctx.output.kv("controls", &controls);
        }
        if !node.sizes.is_empty() {
            ctx.output.kv("sizes", &sizes_summary(&node.sizes));
        }
    }

    if ctx.output.is_verbose() {
        for id in &orphaned {
            ctx.output.debug(&format!("children of {} are never rendered", id));
        }
    }

    if cart.has_pending_changes() {
        ctx.output.warn("Snapshot contains optimistic lines awaiting confirmation");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosoris_commerce::cart::Merchandise;
    use mosoris_commerce::ids::VariantId;

    #[test]
    fn test_line_title_labels_options() {
        let merchandise = Merchandise::new("v1", "forma-polo", "Forma póló")
            .with_option("Size", "M")
            .with_option("Color", "Fekete");
        let line = CartLine::new("l1", 1, merchandise);

        assert_eq!(
            line_title(&line, &CatalogConfig::default()),
            "Forma póló (M) [Szín: Fekete]"
        );
    }

    #[test]
    fn test_line_title_falls_back_to_handle() {
        let line = CartLine::new("l1", 1, Merchandise::new("v1", "vaszontaska", ""));
        assert_eq!(line_title(&line, &CatalogConfig::default()), "vaszontaska");
    }

    #[test]
    fn test_controls_summary() {
        let line = CartLine::new("l1", 2, Merchandise::new("v1", "tee", "Tee"));
        assert_eq!(
            controls_summary(&QuantityControls::for_line(&line)),
            "-→1 +→3 remove"
        );
        assert_eq!(
            controls_summary(&QuantityControls::for_line(&line.optimistic())),
            ""
        );
    }

    #[test]
    fn test_sizes_summary() {
        let choice = |size: &str, available, selected| SizeChoice {
            variant_id: VariantId::new(format!("v-{size}")),
            size: size.to_string(),
            available,
            selected,
        };
        let sizes = [
            choice("S", true, false),
            choice("M", true, true),
            choice("XL", false, false),
        ];
        assert_eq!(sizes_summary(&sizes), "S [M] XL (sold out)");
    }
}
