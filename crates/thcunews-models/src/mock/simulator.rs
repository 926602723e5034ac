use rand::seq::SliceRandom;
use rand::Rng;

use super::SimulatorConfig;
use crate::category::match_keywords;
use crate::types::{round_one_decimal, TOP_K};
use crate::{Category, ModelKind, PredictResponse, Probability};

/// Keyword match first, otherwise a uniform pick over every category.
pub fn pick_category<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Category {
    match_keywords(text).unwrap_or_else(|| {
        *Category::ALL
            .choose(rng)
            .unwrap_or(&Category::Other)
    })
}

/// Splits `remaining` into `TOP_K - 1` shares. Each share is a uniform
/// fraction of whatever mass is left after the previous ones, so the shares
/// shrink on average and never add up to more than `remaining`.
pub fn split_remaining<R: Rng + ?Sized>(remaining: f64, rng: &mut R) -> [f64; TOP_K - 1] {
    let mut left = remaining;
    let mut shares = [0.0; TOP_K - 1];
    for share in &mut shares {
        let value = rng.gen::<f64>() * left;
        left -= value;
        *share = value;
    }
    shares
}

/// Saturates instead of wrapping; `validate` rules out configs that would
/// reach `u64::MAX`.
pub fn draw_latency<R: Rng + ?Sized>(
    model: ModelKind,
    config: &SimulatorConfig,
    rng: &mut R,
) -> u64 {
    let base = rng.gen_range(0..config.latency_base_span.max(1));
    config.latency_offset(model).saturating_add(base)
}

/// Produces a fabricated prediction for `text`.
///
/// Expects a validated `config`. Displayed percentages are rounded one by
/// one, so their total may deviate from 100.
pub fn simulate<R: Rng + ?Sized>(
    text: &str,
    model: ModelKind,
    config: &SimulatorConfig,
    rng: &mut R,
) -> PredictResponse {
    let category = pick_category(text, rng);

    let mut others: Vec<Category> = Category::ALL
        .into_iter()
        .filter(|candidate| *candidate != category)
        .collect();
    others.shuffle(rng);

    let confidence = rng.gen_range(config.confidence_min..config.confidence_max);

    let mut probabilities = Vec::with_capacity(TOP_K);
    probabilities.push(Probability {
        name: category,
        value: round_one_decimal(confidence * 100.0),
    });
    let shares = split_remaining(1.0 - confidence, rng);
    probabilities.extend(others.into_iter().zip(shares).map(|(name, share)| Probability {
        name,
        value: round_one_decimal(share * 100.0),
    }));

    // Stable, so the winning entry stays first on a tie.
    probabilities.sort_by(|a, b| b.value.total_cmp(&a.value));

    PredictResponse {
        category,
        confidence,
        probabilities,
        inference_time_ms: draw_latency(model, config, rng),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn finance_headline_resolves_to_finance_for_any_seed() {
        let config = SimulatorConfig::default();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let text = "股市今日大涨，黄金价格攀升";
            let response = simulate(text, ModelKind::Bert, &config, &mut rng);
            assert_eq!(response.category, Category::Finance);
        }
    }

    #[test]
    fn unmatched_text_eventually_hits_several_categories() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(pick_category("今天天气晴朗", &mut rng));
        }
        assert!(seen.len() >= 5, "fallback picks looked non-uniform: {seen:?}");
    }

    #[test]
    fn shares_never_exceed_remaining_mass() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let shares = split_remaining(0.25, &mut rng);
            let total: f64 = shares.iter().sum();
            assert!(total <= 0.25 + 1e-12);
            assert!(shares.iter().all(|share| *share >= 0.0));
        }
    }

    #[test]
    fn same_seed_same_result() {
        let config = SimulatorConfig::default();
        let text = "随便写点什么";
        let a = simulate(text, ModelKind::Roberta, &config, &mut StdRng::seed_from_u64(3));
        let b = simulate(text, ModelKind::Roberta, &config, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn categories_in_distribution_are_distinct() {
        let config = SimulatorConfig::default();
        let mut rng = StdRng::seed_from_u64(99);
        let response = simulate("芯片", ModelKind::Bert, &config, &mut rng);
        let mut names: Vec<_> = response.probabilities.iter().map(|p| p.name).collect();
        names.sort_by_key(|name| name.label());
        names.dedup();
        assert_eq!(names.len(), TOP_K);
    }

    #[test]
    fn latency_saturates_at_the_top_of_u64() {
        let config = SimulatorConfig {
            roberta_latency_offset_ms: u64::MAX,
            ..SimulatorConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..32 {
            assert_eq!(draw_latency(ModelKind::Roberta, &config, &mut rng), u64::MAX);
        }
    }
}
