mod cli;

use anyhow::{Context, Result};
use carbon_portal::api::{ApiClient, LoginCredentials};
use carbon_portal::catalog::plans;
use carbon_portal::format::ActivityType;
use carbon_portal::{Config, RequestQueue};
use clap::Parser;
use cli::helpers::{render_config, render_estimate, render_plans, render_summary, SummaryCharts};
use cli::{Cli, Commands, EstimateArgs, PlansArgs, SummaryArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments first to get debug flag
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Show => handle_show_command(&config),
        Commands::Estimate(args) => handle_estimate_command(&args, &config),
        Commands::Plans(args) => handle_plans_command(&args)?,
        Commands::Summary(args) => handle_summary_command(&args, &config).await?,
    }

    Ok(())
}

fn handle_show_command(config: &Config) {
    print!("{}", render_config(config));
}

fn handle_estimate_command(args: &EstimateArgs, config: &Config) {
    // Unknown activities parse to `Other` and count one-to-one
    let activity = args
        .activity
        .parse::<ActivityType>()
        .unwrap_or_else(|never| match never {});
    if let ActivityType::Other(name) = &activity {
        eprintln!("⚠️ No emission factor for '{}', counting 1 kg CO2e per unit", name);
    }
    println!("{}", render_estimate(&activity, args.amount, config.display.decimals));
}

fn handle_plans_command(args: &PlansArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(plans())?);
    } else {
        print!("{}", render_plans(plans()));
    }
    Ok(())
}

async fn handle_summary_command(args: &SummaryArgs, config: &Config) -> Result<()> {
    let queue = RequestQueue::new(&config.queue);
    let client = ApiClient::new(&config.api, queue).context("Failed to create API client")?;

    let credentials = LoginCredentials {
        email: args.email.clone(),
        password: args.password.clone(),
    };
    let session = client
        .login(&credentials)
        .await
        .with_context(|| format!("Login to {} failed", config.api.base_url))?;
    println!("🔐 Logged in as {} ({})", session.user.email, session.user.company_name);

    let summary = client
        .emission_summary(args.days)
        .await
        .context("Failed to fetch emission summary")?;

    if args.json {
        println!("{}", SummaryCharts::from_summary(&summary).to_json()?);
    } else {
        println!("📊 Emissions over the last {} days\n", args.days);
        print!("{}", render_summary(&summary, config.display.decimals));
    }

    client.logout();
    Ok(())
}
