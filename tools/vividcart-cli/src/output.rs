//! Output formatting for the CLI.

use console::style;
use vividcart_commerce::cart::CartSummary;
use vividcart_commerce::catalog::{Product, Rating, STAR_COUNT};

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
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print products as a table.
    pub fn products<'a>(&self, products: impl IntoIterator<Item = &'a Product>) {
        const WIDTHS: [usize; 4] = [14, 30, 10, 12];
        self.table_row(&["ID", "NAME", "PRICE", "RATING"], &WIDTHS);
        for product in products {
            let rating = format!("{} {}", stars(product.rating), product.rating.display());
            self.table_row(
                &[
                    product.id.as_str(),
                    &product.name,
                    &product.price_display(),
                    &rating,
                ],
                &WIDTHS,
            );
        }
    }

    /// Print a cart with its subtotal.
    pub fn cart(&self, summary: &CartSummary) {
        if self.json {
            return;
        }
        if summary.is_empty() {
            println!("  {}", style("Your cart is empty.").dim());
            return;
        }

        const WIDTHS: [usize; 4] = [30, 10, 5, 12];
        for line in &summary.lines {
            self.table_row(
                &[
                    &line.name,
                    &line.unit_price.display(),
                    &format!("x{}", line.qty),
                    &line.line_total.display(),
                ],
                &WIDTHS,
            );
        }
        println!(
            "  {} {}  {}",
            style("Subtotal").dim(),
            style(summary.subtotal.display()).bold(),
            style(format!("({} items)", summary.item_count)).dim()
        );
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Rating as filled and empty stars (e.g., "★★★★☆").
pub fn stars(rating: Rating) -> String {
    let filled = rating.filled_stars() as usize;
    let empty = STAR_COUNT as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}
