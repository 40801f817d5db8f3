use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use escrow_core::analysis::{self, EscrowAnalysisInput};
use escrow_core::calendar::parse_ymd;
use escrow_core::deposit::{project_balances, required_monthly_deposit};
use escrow_core::schedule::{self, DisbursementSchedule, ScheduleInput};

use crate::input;

/// Arguments for a full escrow analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON or YAML input file with the loan record
    #[arg(long)]
    pub input: Option<String>,

    /// Override the starting escrow balance from the input record
    #[arg(long)]
    pub starting_balance: Option<Decimal>,

    /// Override the analysis start date (YYYY-MM-DD)
    #[arg(long)]
    pub analysis_start: Option<String>,

    /// Override the cushion policy ceiling in dollars
    #[arg(long)]
    pub cushion_ceiling: Option<Decimal>,

    /// Override the monthly interest credit
    #[arg(long, alias = "credit")]
    pub interest_credit: Option<Decimal>,
}

/// Arguments for calendar construction
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML input file with the charge list
    #[arg(long)]
    pub input: Option<String>,

    /// Override the analysis start date (YYYY-MM-DD)
    #[arg(long)]
    pub analysis_start: Option<String>,
}

/// Arguments for the standalone deposit solver
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct DepositArgs {
    /// Path to JSON input file with balance, schedule, credit, and cushion
    #[arg(long)]
    pub input: Option<String>,

    /// Starting escrow balance
    #[arg(long)]
    pub starting_balance: Option<Decimal>,

    /// Comma-separated disbursement amounts for months 1-12 (missing months
    /// are zero)
    #[arg(long)]
    pub disbursements: Option<String>,

    /// Monthly interest credit
    #[arg(long, alias = "credit", default_value = "0")]
    pub interest_credit: Decimal,

    /// Allowed cushion in dollars
    #[arg(long, default_value = "0")]
    pub cushion: Decimal,
}

/// Standalone solver request, for `--input` form of the deposit command.
#[derive(Deserialize)]
struct DepositRequest {
    starting_balance: Decimal,
    schedule: Vec<Decimal>,
    #[serde(default)]
    monthly_interest_credit: Decimal,
    #[serde(default)]
    allowed_cushion: Decimal,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut analysis_input: EscrowAnalysisInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json|file.yaml> or stdin required for escrow analysis".into());
    };

    if let Some(balance) = args.starting_balance {
        analysis_input.starting_balance = balance;
    }
    if let Some(ref date) = args.analysis_start {
        analysis_input.analysis_start = parse_ymd(date)
            .ok_or_else(|| format!("Invalid --analysis-start '{}': expected YYYY-MM-DD", date))?;
    }
    if let Some(ceiling) = args.cushion_ceiling {
        analysis_input.cushion_ceiling = Some(ceiling);
    }
    if let Some(credit) = args.interest_credit {
        analysis_input.monthly_interest_credit = credit;
    }

    let result = analysis::analyze_escrow(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut schedule_input: ScheduleInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json|file.yaml> or stdin required for schedule build".into());
    };

    if let Some(ref date) = args.analysis_start {
        schedule_input.analysis_start = parse_ymd(date)
            .ok_or_else(|| format!("Invalid --analysis-start '{}': expected YYYY-MM-DD", date))?;
    }

    let result = schedule::build_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_deposit(args: DepositArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: DepositRequest = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let amounts = parse_disbursements(
            args.disbursements
                .as_deref()
                .ok_or("--disbursements is required (or provide --input)")?,
        )?;
        DepositRequest {
            starting_balance: args
                .starting_balance
                .ok_or("--starting-balance is required (or provide --input)")?,
            schedule: amounts,
            monthly_interest_credit: args.interest_credit,
            allowed_cushion: args.cushion,
        }
    };

    let schedule = DisbursementSchedule::from_amounts(&request.schedule);
    let deposit = required_monthly_deposit(
        request.starting_balance,
        &schedule,
        request.monthly_interest_credit,
        request.allowed_cushion,
    );
    let projection = project_balances(
        request.starting_balance,
        deposit,
        &schedule,
        request.monthly_interest_credit,
    );

    Ok(serde_json::json!({
        "required_monthly_deposit": deposit.to_string(),
        "month_end_balances": projection
            .month_end_balances
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<String>>(),
        "minimum_projected_balance": projection.minimum_balance.to_string(),
    }))
}

fn parse_disbursements(raw: &str) -> Result<Vec<Decimal>, Box<dyn std::error::Error>> {
    let amounts = raw
        .split(',')
        .map(|part| part.trim().parse::<Decimal>())
        .collect::<Result<Vec<Decimal>, _>>()
        .map_err(|e| format!("Invalid --disbursements list: {}", e))?;
    if amounts.len() > 12 {
        return Err(format!(
            "--disbursements takes at most 12 amounts, got {}",
            amounts.len()
        )
        .into());
    }
    Ok(amounts)
}
