//! Schema command - print the JSON format of the structured receipt

use crate::receipt::ReceiptSummary;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = schema_for!(ReceiptSummary);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
