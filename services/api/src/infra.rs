use loan_decision::config::DecisionConfig;
use loan_decision::decision::{parse_birth_date, DecisionEngine, InMemoryClientRegistry};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Engine = DecisionEngine<InMemoryClientRegistry>;

/// Loads the client dataset once and wires it to the configured limits.
pub(crate) fn build_engine(config: &DecisionConfig) -> Arc<Engine> {
    let registry = InMemoryClientRegistry::load(config.client_data_path.as_deref());
    Arc::new(DecisionEngine::new(Arc::new(registry), config.limits))
}

pub(crate) fn parse_birth_date_arg(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    parse_birth_date(trimmed)
        .map(|_| trimmed.to_string())
        .ok_or_else(|| format!("failed to parse '{raw}' as DD.MM.YYYY"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_decision::decision::DecisionLimits;

    #[test]
    fn birth_date_argument_keeps_original_text() {
        assert_eq!(
            parse_birth_date_arg(" 01.02.1990 "),
            Ok("01.02.1990".to_string())
        );
        assert!(parse_birth_date_arg("1990-02-01").is_err());
    }

    #[test]
    fn engine_falls_back_to_bundled_dataset() {
        let config = DecisionConfig {
            limits: DecisionLimits::default(),
            client_data_path: None,
        };
        let engine = build_engine(&config);
        assert!(!engine.registry().is_empty());
        assert_eq!(engine.limits(), &DecisionLimits::default());
    }
}
