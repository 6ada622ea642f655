use clap::Parser;
use financial_advisor_api::{
    advisor::Advisor, classifier::RequestClassifier, config::AdvisorConfig,
    engine::build_engine, profile::ProfileValidator,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ask the financial advisor a single question
#[derive(Debug, Parser)]
#[command(name = "advisor", version)]
struct Cli {
    /// Question or bare stock name (e.g. "TCS" or "Should I buy Infosys?")
    #[arg(required = true, num_args = 1..)]
    question: Vec<String>,

    /// Investor age in years
    #[arg(long, allow_negative_numbers = true)]
    age: Option<i64>,

    /// Monthly salary in rupees
    #[arg(long, allow_negative_numbers = true)]
    monthly_salary: Option<f64>,

    /// low, moderate, high-moderate or high
    #[arg(long)]
    risk_appetite: Option<String>,

    /// Print the enriched query and allocation plan without calling the engine
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = AdvisorConfig::from_env()?;

    let question = cli.question.join(" ");
    let profile =
        ProfileValidator::validate(cli.age, cli.monthly_salary, cli.risk_appetite.as_deref())?;

    let engine = build_engine(&config.engine)?;
    let advisor = Advisor::new(engine, RequestClassifier::new(config.classifier));

    if cli.dry_run {
        let query = advisor.prepare(&question, &profile)?;
        println!("{}", serde_json::to_string_pretty(&query)?);
        return Ok(());
    }

    info!(engine = advisor.engine_name(), "Asking advisor");

    let advice = advisor.ask(&question, &profile).await?;
    match advice.response.answer_text {
        Some(answer) => println!("{}", answer),
        None => {
            eprintln!(
                "Could not extract an answer: {}",
                advice.response.error_message.unwrap_or_default()
            );
            std::process::exit(1);
        }
    }

    Ok(())
}
