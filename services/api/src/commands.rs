use crate::infra::{build_engine, parse_birth_date_arg};
use clap::Args;
use loan_decision::config::AppConfig;
use loan_decision::decision::{
    decide_all, parse_requests, ClientRegistry, DecisionError, DecisionRequest, DecisionResponse,
};
use loan_decision::error::AppError;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// Estonian personal code of the applicant
    #[arg(long)]
    pub(crate) personal_code: String,
    /// Birth date (DD.MM.YYYY); required on a client's first decision
    #[arg(long, value_parser = parse_birth_date_arg)]
    pub(crate) age: Option<String>,
    /// Requested loan amount
    #[arg(long)]
    pub(crate) loan_amount: u64,
    /// Requested loan period in months
    #[arg(long)]
    pub(crate) loan_period: u32,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with personal_code,age,loan_amount,loan_period columns
    #[arg(long)]
    pub(crate) requests: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ClientArgs {
    /// Estonian personal code of the client
    #[arg(long)]
    pub(crate) personal_code: String,
}

pub(crate) fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config.decision);

    let request = DecisionRequest::new(
        args.personal_code,
        args.age.unwrap_or_default(),
        args.loan_amount,
        args.loan_period,
    );
    let response = DecisionResponse::from(engine.decide(&request));

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config.decision);

    let file = File::open(&args.requests)?;
    let requests = parse_requests(BufReader::new(file))?;

    for decision in decide_all(&engine, &requests) {
        println!("{}", serde_json::to_string(&decision)?);
    }
    Ok(())
}

pub(crate) fn run_client(args: ClientArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config.decision);

    match engine
        .registry()
        .age_of(&args.personal_code)
        .map_err(DecisionError::from)?
    {
        Some(age) if age.is_empty() => {
            println!("{}: no birth date on record", args.personal_code)
        }
        Some(age) => println!("{}: {}", args.personal_code, age),
        None => println!("{}: client not found", args.personal_code),
    }
    Ok(())
}
