//! Mortgage analytics CLI
//!
//! Amortizes a loan, projects the property value and writes every analysis table as CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use mortgage_analytics::loan::{load_loan_config, load_scenarios, OneTimePayment};
use mortgage_analytics::output::{write_batch_summary, write_report};
use mortgage_analytics::projection::annualize;
use mortgage_analytics::scenario::{AnalysisReport, ScenarioSummaryRow};
use mortgage_analytics::{Assumptions, LoanConfig, ScenarioRunner};

#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Mortgage amortization, property value and rent-vs-buy analytics"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Amortize one loan and write every analysis table
    Schedule(ScheduleArgs),
    /// Run every scenario in a CSV file and write a summary table
    Batch(BatchArgs),
}

#[derive(Args)]
struct ScheduleArgs {
    /// Loan configuration JSON; the flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Market assumptions JSON (property growth, selling cost, rent)
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// First payment date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    start_date: Option<NaiveDate>,

    #[arg(long)]
    property_value: Option<f64>,

    /// Down payment (%)
    #[arg(long)]
    down_payment_pct: Option<f64>,

    #[arg(long)]
    tenure_years: Option<u32>,

    #[arg(long)]
    payments_per_year: Option<u32>,

    /// True loan rate (%)
    #[arg(long)]
    true_rate_pct: Option<f64>,

    /// Customer rate in year 1 (%)
    #[arg(long)]
    year1_rate_pct: Option<f64>,

    /// Customer rate in year 2 (%)
    #[arg(long)]
    year2_rate_pct: Option<f64>,

    /// Annual property tax rate (%)
    #[arg(long)]
    property_tax_pct: Option<f64>,

    /// Monthly HOA fee
    #[arg(long)]
    hoa: Option<f64>,

    /// Monthly property insurance
    #[arg(long)]
    insurance: Option<f64>,

    /// Extra principal paid every period
    #[arg(long)]
    additional_payment: Option<f64>,

    /// One-time lump sum payment
    #[arg(long)]
    one_time_payment: Option<f64>,

    /// Date of the one-time payment, defaults to the start date
    #[arg(long)]
    one_time_payment_date: Option<NaiveDate>,

    /// Lump sum rebate deducted from the taxable property value
    #[arg(long)]
    tax_rebate: Option<f64>,

    /// Annual property growth (%)
    #[arg(long)]
    property_growth_pct: Option<f64>,

    /// Years after which growth starts to slow
    #[arg(long)]
    growth_slows_after: Option<u32>,

    /// Annual growth reduction after the threshold (%)
    #[arg(long)]
    growth_reduction_pct: Option<f64>,

    /// Selling cost (%)
    #[arg(long)]
    selling_cost_pct: Option<f64>,

    #[arg(long)]
    monthly_rent: Option<f64>,

    /// Annual rent increase (%)
    #[arg(long)]
    rent_increase_pct: Option<f64>,

    /// Directory for the CSV tables
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Number of schedule rows to print
    #[arg(long, default_value_t = 24)]
    preview: usize,
}

#[derive(Args)]
struct BatchArgs {
    /// Scenario CSV, one loan per row
    #[arg(long)]
    scenarios: PathBuf,

    /// Market assumptions JSON shared by all scenarios
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// Summary CSV to write
    #[arg(long, default_value = "batch_summary.csv")]
    output: PathBuf,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Schedule(args) => run_schedule(args),
        Commands::Batch(args) => run_batch(args),
    };

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn load_assumptions(path: Option<&PathBuf>) -> Result<Assumptions> {
    match path {
        Some(path) => Assumptions::from_json_path(path)
            .with_context(|| format!("failed to load assumptions from {}", path.display())),
        None => Ok(Assumptions::default()),
    }
}

fn build_config(args: &ScheduleArgs) -> Result<LoanConfig> {
    let mut config = match &args.config {
        Some(path) => load_loan_config(path)
            .with_context(|| format!("failed to load loan config from {}", path.display()))?,
        None => LoanConfig::with_defaults(
            args.start_date.unwrap_or_else(|| chrono::Local::now().date_naive()),
        ),
    };

    if let Some(date) = args.start_date {
        config.start_date = date;
    }
    if let Some(value) = args.property_value {
        config.property_value = value;
    }
    if let Some(pct) = args.down_payment_pct {
        config.downpayment_fraction = pct / 100.0;
    }
    if let Some(years) = args.tenure_years {
        config.tenure_years = years;
    }
    if let Some(count) = args.payments_per_year {
        config.payments_per_year = count;
    }
    if let Some(pct) = args.true_rate_pct {
        config.true_rate = pct / 100.0;
    }
    if let Some(pct) = args.year1_rate_pct {
        config.year1_rate = pct / 100.0;
    }
    if let Some(pct) = args.year2_rate_pct {
        config.year2_rate = pct / 100.0;
    }
    if let Some(pct) = args.property_tax_pct {
        config.property_tax_rate = pct / 100.0;
    }
    if let Some(fee) = args.hoa {
        config.monthly_hoa = fee;
    }
    if let Some(premium) = args.insurance {
        config.monthly_insurance = premium;
    }
    if let Some(extra) = args.additional_payment {
        config.additional_payment = extra;
    }
    if let Some(amount) = args.one_time_payment {
        config.one_time_payment = (amount > 0.0).then(|| OneTimePayment {
            amount,
            date: args.one_time_payment_date.unwrap_or(config.start_date),
        });
    }
    if let Some(rebate) = args.tax_rebate {
        config.tax_rebate = (rebate > 0.0).then_some(rebate);
    }

    Ok(config)
}

fn apply_market_overrides(args: &ScheduleArgs, assumptions: &mut Assumptions) {
    if let Some(pct) = args.property_growth_pct {
        assumptions.property.base_growth_pct = pct;
    }
    if let Some(years) = args.growth_slows_after {
        assumptions.property.age_threshold_years = years;
    }
    if let Some(pct) = args.growth_reduction_pct {
        assumptions.property.decay_pct_per_year = pct;
    }
    if let Some(pct) = args.selling_cost_pct {
        assumptions.property.selling_cost_fraction = pct / 100.0;
    }
    if let Some(rent) = args.monthly_rent {
        assumptions.rent.monthly_rent = rent;
    }
    if let Some(pct) = args.rent_increase_pct {
        assumptions.rent.annual_growth = pct / 100.0;
    }
}

fn run_schedule(args: ScheduleArgs) -> Result<()> {
    let mut assumptions = load_assumptions(args.assumptions.as_ref())?;
    apply_market_overrides(&args, &mut assumptions);
    let config = build_config(&args)?;

    let runner = ScenarioRunner::with_assumptions(assumptions);
    let report = runner.run(&config).context("analysis failed")?;

    print_report(&report, args.preview);

    let written = write_report(&args.output_dir, &report)
        .with_context(|| format!("failed to write tables to {}", args.output_dir.display()))?;
    println!();
    for path in written {
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<()> {
    let assumptions = load_assumptions(args.assumptions.as_ref())?;
    let scenarios = load_scenarios(&args.scenarios)
        .with_context(|| format!("failed to load scenarios from {}", args.scenarios.display()))?;
    println!("Loaded {} scenarios", scenarios.len());

    let runner = ScenarioRunner::with_assumptions(assumptions);
    let outcomes = runner.run_batch(&scenarios);
    let rows: Vec<ScenarioSummaryRow> = outcomes.iter().map(ScenarioSummaryRow::from_outcome).collect();

    let failed = rows.iter().filter(|r| r.error.is_some()).count();
    write_batch_summary(&args.output, &rows)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("{} succeeded, {} failed", rows.len() - failed, failed);
    println!("Summary written to {}", args.output.display());
    Ok(())
}

fn print_report(report: &AnalysisReport, preview: usize) {
    let summary = &report.summary;

    println!("Mortgage Analytics");
    println!("==================\n");
    println!("  Loan Amount:        ${:.2}", summary.loan_amount);
    println!("  Level Payment:      ${:.2}", summary.level_payment);
    println!("  Periods:            {}", summary.total_periods);
    match summary.payoff_date {
        Some(date) => println!("  Payoff Date:        {}", date),
        None => println!("  Payoff Date:        not repaid"),
    }
    println!("  Customer Interest:  ${:.2}", summary.total_customer_interest);
    println!("  Subsidy:            ${:.2}", summary.total_subsidy);
    println!("  Total Paid:         ${:.2}", summary.total_paid);
    if let Some(rate) = summary.effective_customer_rate {
        let periods = report.config.payments_per_year;
        let effective = annualize(rate / periods as f64, periods);
        println!(
            "  Effective Rate:     {:.4}% nominal ({:.4}% effective annual)",
            rate * 100.0,
            effective * 100.0
        );
    }
    println!();

    println!(
        "{:>6} {:>10} {:>14} {:>10} {:>10} {:>10} {:>10} {:>12}",
        "Period", "Date", "Balance", "Principal", "CustInt", "TrueInt", "Subsidy", "TotalPmt"
    );
    println!("{}", "-".repeat(90));
    for row in report.schedule.records.iter().take(preview) {
        println!(
            "{:>6} {:>10} {:>14.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12.2}",
            row.period,
            row.date,
            row.balance,
            row.principal,
            row.customer_interest,
            row.true_interest,
            row.subsidy,
            row.total_payment,
        );
    }
    if report.schedule.records.len() > preview {
        println!("... ({} more periods)", report.schedule.records.len() - preview);
    }

    let rent = &report.rent_vs_buy;
    println!("\nRent vs Buy ({} years):", rent.years);
    println!("  Total Rent:             ${:.2}", rent.total_rent);
    println!("  Total Non-Equity Cost:  ${:.2}", rent.total_non_equity_cost);
    println!("  Equity Built:           ${:.2}", rent.final_equity);
    println!("  Years Renting Cheaper:  {}", rent.years_renting_cheaper);

    if let Some(last) = report.net_proceeds.last() {
        println!("\nSale at year {} ({}):", last.year_index, last.year);
        println!("  Property Value:         ${:.2}", last.property_value);
        println!("  Net Proceeds:           ${:.2}", last.net_proceeds);
        println!("  Actual Net Proceed:     ${:.2}", last.actual_net_proceed);
        println!("  Net Gain/Loss:          ${:.2}", last.net_gain_or_loss);
    }
}
