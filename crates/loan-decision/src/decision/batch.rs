use std::io::Read;

use serde::{Deserialize, Serialize};

use super::domain::DecisionRequest;
use super::engine::DecisionEngine;
use super::outcome::DecisionResponse;
use super::registry::ClientRegistry;

#[derive(Debug, Deserialize)]
struct RequestRow {
    personal_code: String,
    #[serde(default)]
    age: String,
    loan_amount: u64,
    loan_period: u32,
}

/// Reads `personal_code,age,loan_amount,loan_period` rows with a header line.
pub fn parse_requests<R: Read>(reader: R) -> Result<Vec<DecisionRequest>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut requests = Vec::new();

    for record in csv_reader.deserialize::<RequestRow>() {
        let row = record?;
        requests.push(DecisionRequest::new(
            row.personal_code,
            row.age,
            row.loan_amount,
            row.loan_period,
        ));
    }

    Ok(requests)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDecision {
    pub personal_code: String,
    #[serde(flatten)]
    pub response: DecisionResponse,
}

/// Decides rows in file order so repeated codes see earlier age registrations.
pub fn decide_all<R>(
    engine: &DecisionEngine<R>,
    requests: &[DecisionRequest],
) -> Vec<BatchDecision>
where
    R: ClientRegistry + 'static,
{
    requests
        .iter()
        .map(|request| BatchDecision {
            personal_code: request.personal_code.clone(),
            response: DecisionResponse::from(engine.decide(request)),
        })
        .collect()
}
