use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thcunews_models::mock::simulator::simulate;
use thcunews_models::mock::SimulatorConfig;
use thcunews_models::types::round_one_decimal;
use thcunews_models::{Category, ModelKind, PredictResponse, TOP_K};

fn model_strategy() -> impl Strategy<Value = ModelKind> {
    prop_oneof![Just(ModelKind::Bert), Just(ModelKind::Roberta)]
}

fn sport_keyword() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("赛"), Just("赢"), Just("球"), Just("冠")]
}

fn run(text: &str, model: ModelKind, seed: u64) -> PredictResponse {
    simulate(text, model, &SimulatorConfig::default(), &mut StdRng::seed_from_u64(seed))
}

proptest! {
    #[test]
    fn distribution_has_five_sorted_entries(
        text in ".{0,80}",
        seed in any::<u64>(),
        model in model_strategy(),
    ) {
        let response = run(&text, model, seed);
        prop_assert_eq!(response.probabilities.len(), TOP_K);
        for pair in response.probabilities.windows(2) {
            prop_assert!(
                pair[0].value >= pair[1].value,
                "not sorted: {:?}",
                response.probabilities
            );
        }
    }

    #[test]
    fn winning_category_is_top_and_matches_confidence(text in ".{0,80}", seed in any::<u64>()) {
        let response = run(&text, ModelKind::Bert, seed);
        let top = response.probabilities[0];
        prop_assert_eq!(top.name, response.category);
        prop_assert_eq!(top.value, round_one_decimal(response.confidence * 100.0));
        prop_assert!(response.probabilities.iter().all(|entry| entry.value <= top.value));
    }

    #[test]
    fn confidence_stays_in_range(seed in any::<u64>()) {
        let response = run("", ModelKind::Roberta, seed);
        prop_assert!(response.confidence >= 0.70 && response.confidence < 0.95);
    }

    #[test]
    fn total_never_exceeds_hundred_by_more_than_rounding(seed in any::<u64>()) {
        let response = run("其他新闻", ModelKind::Bert, seed);
        // Five independently rounded entries, 0.05 of slack each.
        prop_assert!(response.total_percent() <= 100.0 + 0.25 + 1e-9);
    }

    #[test]
    fn sport_keyword_always_wins(
        prefix in "[a-z ]{0,20}",
        keyword in sport_keyword(),
        seed in any::<u64>(),
    ) {
        let text = format!("{prefix}{keyword}股市芯片");
        let response = run(&text, ModelKind::Bert, seed);
        prop_assert_eq!(response.category, Category::Sports);
    }

    #[test]
    fn latency_stays_within_model_bounds(seed in any::<u64>(), model in model_strategy()) {
        let config = SimulatorConfig::default();
        let response = simulate("AI", model, &config, &mut StdRng::seed_from_u64(seed));
        let (low, high) = config.latency_bounds(model);
        prop_assert!((low..=high).contains(&response.inference_time_ms));
    }
}

#[test]
fn roberta_is_slower_on_average() {
    let config = SimulatorConfig::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let mean = |model: ModelKind, rng: &mut StdRng| -> f64 {
        let total: u64 = (0..500)
            .map(|_| simulate("球赛", model, &config, rng).inference_time_ms)
            .sum();
        total as f64 / 500.0
    };
    let bert = mean(ModelKind::Bert, &mut rng);
    let roberta = mean(ModelKind::Roberta, &mut rng);
    assert!(roberta > bert + 100.0, "bert={bert} roberta={roberta}");
}
