use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config YAML file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging for internal details
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the effective configuration
    Show,
    /// Estimate CO2e for an activity
    Estimate(EstimateArgs),
    /// List the pricing plans
    Plans(PlansArgs),
    /// Log in and print the emission summary charts
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Activity type (electricity, gas, water, transport, product)
    #[arg(long)]
    pub activity: String,

    /// Amount of activity in its native unit
    #[arg(long)]
    pub amount: f64,
}

#[derive(Args, Debug)]
pub struct PlansArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    /// Reporting window in days
    #[arg(long, default_value_t = 30)]
    pub days: u32,

    /// Print chart data as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_estimate() {
        let cli = Cli::try_parse_from([
            "carbon-portal",
            "--debug",
            "estimate",
            "--activity",
            "electricity",
            "--amount",
            "1200",
        ])
        .unwrap();

        assert!(cli.debug);
        match cli.command {
            Commands::Estimate(args) => {
                assert_eq!(args.activity, "electricity");
                assert_eq!(args.amount, 1200.0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_summary_default_days() {
        let cli = Cli::try_parse_from([
            "carbon-portal",
            "summary",
            "--email",
            "ops@acme.test",
            "--password",
            "pw",
            "--config",
            "portal.yaml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("portal.yaml")));
        match cli.command {
            Commands::Summary(args) => {
                assert_eq!(args.days, 30);
                assert!(!args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["carbon-portal"]).is_err());
    }
}
