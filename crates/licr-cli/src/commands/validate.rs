//! Validate command - check a submission date against a financial year.

use clap::Args;
use console::style;

use licr_core::validate_period;

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Submission date in ISO format (e.g. 2023-08-15 or 2023-08-15T00:00:00)
    #[arg(short, long)]
    date: Option<String>,

    /// Financial year label (e.g. 2023-24)
    #[arg(short = 'y', long)]
    financial_year: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let result = validate_period(args.date.as_deref(), &args.financial_year);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.is_valid {
        println!("{} {}", style("✓").green(), result.message);
    }

    if !result.is_valid {
        anyhow::bail!("{}", result.message);
    }

    Ok(())
}
