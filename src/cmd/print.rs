//! Print command - parse a basket and render its receipt

use crate::cmd::read_basket;
use crate::receipt::Receipt;
use crate::tax::TaxPolicy;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct PrintCommand {
    /// Basket text file, one product line per line (or stdin with "-")
    #[arg(short, long)]
    basket: PathBuf,

    /// Override the exempt product categories (repeatable)
    #[arg(long = "exempt", value_name = "PRODUCT")]
    exempt: Vec<String>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl PrintCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let text = read_basket(&self.basket)?;
        let policy = if self.exempt.is_empty() {
            TaxPolicy::default()
        } else {
            TaxPolicy::new(self.exempt.iter().cloned())
        };

        let receipt = Receipt::from_text(&text, &policy)?;
        log::debug!("computed receipt for {} basket line(s)", receipt.lines.len());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&receipt.summary())?);
        } else {
            println!("{receipt}");
        }
        Ok(())
    }
}
