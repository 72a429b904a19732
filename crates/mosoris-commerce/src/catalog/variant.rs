//! Product variants, option labels and the in-cart size swap.

use crate::ids::VariantId;
use crate::money::Money;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Characters left as-is in form-encoded query values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

fn encode_query_component(s: &str) -> String {
    utf8_percent_encode(s, QUERY_VALUE)
        .to_string()
        .replace("%20", "+")
}

/// Product page URL with the variant's options preselected.
///
/// Later options with a repeated name replace earlier ones, as the query
/// string holds one value per option.
pub fn variant_url(handle: &str, selected_options: &[SelectedOption]) -> String {
    let mut params: Vec<(&str, &str)> = Vec::new();
    for opt in selected_options {
        match params.iter_mut().find(|(name, _)| *name == opt.name) {
            Some(existing) => existing.1 = opt.value.as_str(),
            None => params.push((opt.name.as_str(), opt.value.as_str())),
        }
    }

    let path = format!("/products/{handle}");
    if params.is_empty() {
        return path;
    }

    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", encode_query_component(k), encode_query_component(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}

/// A selected option on a variant (e.g., Méret: L).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SelectedOption {
    /// Option name (e.g., "Size", "Color").
    pub name: String,
    /// Option value (e.g., "L", "Fekete").
    pub value: String,
}

impl SelectedOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A purchasable variant as delivered by the catalog layer.
///
/// Catalog data is validated against this shape when it is decoded; a
/// product without a variants list decodes with an empty one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Unique variant identifier.
    pub id: VariantId,
    /// Variant title (e.g., "L / Fekete").
    #[serde(default)]
    pub title: String,
    /// Whether the variant can be bought right now.
    pub available_for_sale: bool,
    /// Options that define this variant.
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    /// Current price.
    #[serde(default)]
    pub price: Option<Money>,
    /// Compare-at price set in the catalog.
    #[serde(default)]
    pub compare_at_price: Option<Money>,
}

impl ProductVariant {
    /// Value of the named option, compared case-insensitively.
    pub fn option_value(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.selected_options
            .iter()
            .find(|o| o.name.to_lowercase() == name)
            .map(|o| o.value.as_str())
    }
}

/// A product option with all of its values, as shown on the product page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// One entry of the size selector shown on a cart line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SizeChoice {
    /// Variant the line would be swapped to.
    pub variant_id: VariantId,
    /// The size value (e.g., "M").
    pub size: String,
    /// Sold-out sizes are listed but cannot be picked.
    pub available: bool,
    /// The variant currently in the cart.
    pub selected: bool,
}

/// Catalog presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Option names treated as "size", matched case-insensitively.
    pub size_option_names: Vec<String>,
    /// Display labels for option names; unknown names pass through.
    pub option_labels: BTreeMap<String, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let option_labels = [
            ("Size", "M\u{e9}ret"),
            ("Color", "Sz\u{ed}n"),
            ("Style", "St\u{ed}lus"),
            ("Material", "Anyag"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            option_labels,
            size_option_names: vec!["size".to_string(), "m\u{e9}ret".to_string()],
        }
    }
}

impl CatalogConfig {
    /// Display label for an option name.
    pub fn label<'a>(&'a self, name: &'a str) -> &'a str {
        self.option_labels
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }

    /// Whether the option name denotes a size.
    pub fn is_size_option(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.size_option_names
            .iter()
            .any(|s| s.to_lowercase() == name)
    }

    /// Options worth showing: a single-valued option offers no choice.
    pub fn visible_options<'a>(&self, options: &'a [ProductOption]) -> Vec<&'a ProductOption> {
        options.iter().filter(|o| o.values.len() > 1).collect()
    }

    /// Selected options that are not the size, in their original order.
    pub fn non_size_options<'a>(&self, options: &'a [SelectedOption]) -> Vec<&'a SelectedOption> {
        options
            .iter()
            .filter(|o| !self.is_size_option(&o.name))
            .collect()
    }

    /// Variants a cart line may be swapped to by changing only its size.
    ///
    /// A candidate must carry a size option and match every non-size option
    /// of the line exactly. Variants keep their catalog order.
    pub fn size_swap_choices(
        &self,
        current_variant: &VariantId,
        selected_options: &[SelectedOption],
        variants: &[ProductVariant],
    ) -> Vec<SizeChoice> {
        let fixed = self.non_size_options(selected_options);

        variants
            .iter()
            .filter_map(|variant| {
                let size = variant
                    .selected_options
                    .iter()
                    .find(|o| self.is_size_option(&o.name))?;

                let matches = fixed.iter().all(|opt| {
                    variant
                        .selected_options
                        .iter()
                        .any(|vo| vo.name == opt.name && vo.value == opt.value)
                });
                if !matches {
                    return None;
                }

                Some(SizeChoice {
                    variant_id: variant.id.clone(),
                    size: size.value.clone(),
                    available: variant.available_for_sale,
                    selected: &variant.id == current_variant,
                })
            })
            .collect()
    }
}
