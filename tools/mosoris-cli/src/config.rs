//! CLI configuration.

use anyhow::{Context, Result};
use mosoris_commerce::cart::{PriceReconciler, PricingConfig};
use mosoris_commerce::catalog::CatalogConfig;
use mosoris_commerce::format::{FormatConfig, MoneyFormatter};
use serde::{Deserialize, Serialize};

/// Config file names looked up from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["mosoris.toml", ".mosoris.toml", "mosoris.json"];

/// Storefront presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Money display rules.
    #[serde(default)]
    pub format: FormatConfig,

    /// Compare-at price reconstruction.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Option labels and size detection.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config text, as JSON when `path` ends in `.json` and TOML
    /// otherwise.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Formatter for the configured locale.
    pub fn formatter(&self) -> Result<MoneyFormatter> {
        MoneyFormatter::new(self.format.clone()).context("Invalid [format] section")
    }

    /// Reconciler with the configured pricing rules.
    pub fn reconciler(&self) -> PriceReconciler {
        PriceReconciler::new(self.pricing)
    }

    /// Problems that make the config unusable.
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Err(e) = self.format.validate() {
            errors.push(format!("format: {}", e));
        }
        if self.catalog.size_option_names.iter().any(|n| n.trim().is_empty()) {
            errors.push("catalog.size_option_names must not contain empty names".to_string());
        }
        errors
    }

    /// Settings that work but are probably a mistake.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.catalog.size_option_names.is_empty() {
            warnings.push("catalog.size_option_names is empty, size swap is disabled".to_string());
        }
        if self.format.min_grouping_digits > 3 {
            warnings.push(format!(
                "format.min_grouping_digits {} leaves most amounts ungrouped",
                self.format.min_grouping_digits
            ));
        }
        for (name, label) in &self.catalog.option_labels {
            if label.trim().is_empty() {
                warnings.push(format!("catalog.option_labels.{} is empty", name));
            }
        }
        warnings
    }
}

/// Generate a default mosoris.toml config file.
pub fn generate_default_config() -> String {
    r#"# Ars Mosoris storefront configuration

[format]
locale = "hu-HU"
decimal_separator = ","
group_separator = "\u00A0"
min_grouping_digits = 1
symbol_after = true
# Currencies without a rule use their ISO minor units unless overridden
# default_fraction_digits = 2

[format.currencies.HUF]
fraction_digits = 0
symbol = "Ft"

# [format.currencies.EUR]
# fraction_digits = 2

[pricing]
# Hide the compare-at price when a discount is in another currency
strict_currency = false

[catalog]
size_option_names = ["size", "méret"]

[catalog.option_labels]
Size = "Méret"
Color = "Szín"
Style = "Stílus"
Material = "Anyag"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_matches_defaults() {
        let config = StorefrontConfig::parse("mosoris.toml", &generate_default_config()).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StorefrontConfig::parse(
            "mosoris.toml",
            r#"
[pricing]
strict_currency = true
"#,
        )
        .unwrap();
        assert!(config.pricing.strict_currency);
        assert_eq!(config.format, FormatConfig::default());
        assert_eq!(config.catalog.label("Color"), "Sz\u{ed}n");
    }

    #[test]
    fn test_fraction_digit_override_from_toml() {
        let config = StorefrontConfig::parse(
            "mosoris.toml",
            "[format]\ndefault_fraction_digits = 0\n",
        )
        .unwrap();
        assert_eq!(config.format.default_fraction_digits, Some(0));
        assert_eq!(StorefrontConfig::default().format.default_fraction_digits, None);
    }

    #[test]
    fn test_json_by_extension() {
        let config = StorefrontConfig::parse(
            "mosoris.json",
            r#"{"format": {"locale": "en-US", "decimal_separator": ".", "group_separator": ","}}"#,
        )
        .unwrap();
        assert_eq!(config.format.locale, "en-US");
        assert_eq!(config.format.decimal_separator, '.');
        assert!(config.errors().is_empty());
    }

    #[test]
    fn test_bad_toml_is_reported() {
        let err = StorefrontConfig::parse("mosoris.toml", "[pricing\n").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_errors_and_warnings() {
        let mut config = StorefrontConfig::default();
        config.format.group_separator = ',';
        config.catalog.size_option_names.clear();

        let errors = config.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("format:"));
        assert_eq!(config.warnings().len(), 1);
        assert!(config.formatter().is_err());
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = StorefrontConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(StorefrontConfig::parse("mosoris.toml", &text).unwrap(), config);
    }
}
