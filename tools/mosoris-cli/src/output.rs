//! Output formatting for the CLI.

use console::style;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", table_row(cols, widths));
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Pad columns to their widths; the last column is not padded.
pub fn table_row(cols: &[&str], widths: &[usize]) -> String {
    let last = cols.len().saturating_sub(1);
    cols.iter()
        .enumerate()
        .map(|(i, col)| match widths.get(i) {
            Some(width) if i < last => {
                let pad = width.saturating_sub(col.chars().count());
                format!("{}{}", col, " ".repeat(pad))
            }
            _ => col.to_string(),
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Tree branch prefix for a line at `depth`.
pub fn tree_prefix(depth: usize) -> String {
    if depth == 0 {
        String::new()
    } else {
        format!("{}└─ ", "   ".repeat(depth - 1))
    }
}

/// Badge for a line awaiting backend confirmation.
pub fn pending_badge(optimistic: bool) -> String {
    if optimistic {
        style("pending").yellow().to_string()
    } else {
        String::new()
    }
}

/// Strikethrough-style rendering of a compare-at price.
pub fn struck(price: &str) -> String {
    style(price).dim().strikethrough().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_prefix() {
        assert_eq!(tree_prefix(0), "");
        assert_eq!(tree_prefix(1), "└─ ");
        assert_eq!(tree_prefix(2), "   └─ ");
    }

    #[test]
    fn test_table_row_pads_by_chars() {
        assert_eq!(table_row(&["Méret", "M"], &[7, 3]), "Méret    M");
        assert_eq!(table_row(&["toolongvalue", "x"], &[4, 1]), "toolongvalue  x");
    }

    #[test]
    fn test_pending_badge_empty_when_settled() {
        assert!(pending_badge(false).is_empty());
        assert!(pending_badge(true).contains("pending"));
    }
}
