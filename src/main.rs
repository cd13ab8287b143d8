use clap::{Parser, Subcommand};

mod basket;
mod cmd;
mod receipt;
mod tax;

#[derive(Parser, Debug)]
#[command(name = "till", version, about = "Retail sales tax receipt calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a basket and print the receipt
    Print(cmd::print::PrintCommand),
    /// Print the JSON Schema of the structured receipt output
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Print(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
