use rand::Rng;
use tracing::warn;

use crate::error::{Error, Result};

/// Desirability of moving along an edge: `pheromone^α / distance^β`.
pub fn edge_weight(pheromone: f64, distance: f64, alpha: f64, beta: f64) -> f64 {
    pheromone.powf(alpha) / distance.powf(beta)
}

/// Roulette-wheel choice over `weights` for a draw in `[0, 1)`.
///
/// Walks the candidates in order, accumulating normalised mass, and returns
/// the first index whose cumulative mass reaches `draw`. If rounding leaves
/// the total short of `draw`, the last candidate is returned. An infinite
/// weight (a candidate at distance zero) wins outright.
///
/// Weights are rescaled by the largest one before summing, so finite weights
/// near `f64::MAX` cannot overflow the total.
pub fn roulette_select(weights: &[f64], draw: f64) -> Result<usize> {
    if weights.is_empty() {
        return Err(Error::numeric_degeneracy("no candidates to choose from"));
    }
    if let Some(index) = first_infinite(weights) {
        return Ok(index);
    }

    let peak = weights.iter().copied().fold(0.0, f64::max);
    let total: f64 = if peak > 0.0 {
        weights.iter().map(|w| w / peak).sum()
    } else {
        0.0
    };
    if !(total > 0.0 && total.is_finite()) {
        return Err(Error::numeric_degeneracy(format!(
            "total candidate weight is {} over {} candidates",
            total * peak,
            weights.len()
        )));
    }

    let mut cumulative = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight / peak / total;
        if cumulative >= draw {
            return Ok(index);
        }
    }

    warn!(
        "Draw {} exceeded cumulative mass {}, taking last candidate",
        draw, cumulative
    );
    Ok(weights.len() - 1)
}

/// Pick a candidate index, drawing from `rng` only when a draw is needed.
pub fn select_next<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Result<usize> {
    match first_infinite(weights) {
        Some(index) => Ok(index),
        None => roulette_select(weights, rng.gen::<f64>()),
    }
}

fn first_infinite(weights: &[f64]) -> Option<usize> {
    weights.iter().position(|w| *w == f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_edge_weight() {
        assert!((edge_weight(1.0, 2.0, 1.0, 1.0) - 0.5).abs() < 1e-12);
        assert!((edge_weight(0.25, 0.5, 0.5, 2.0) - 2.0).abs() < 1e-12);
        assert_eq!(edge_weight(0.1, 0.0, 1.5, 4.0), f64::INFINITY);
    }

    #[test]
    fn test_roulette_walks_cumulative_mass() {
        // normalised: 0.18.., 0.31.., 0.5
        let weights = [4.0, 7.0, 11.0];
        assert_eq!(roulette_select(&weights, 0.0).unwrap(), 0);
        assert_eq!(roulette_select(&weights, 0.11).unwrap(), 0);
        assert_eq!(roulette_select(&weights, 0.48).unwrap(), 1);
        assert_eq!(roulette_select(&weights, 0.51).unwrap(), 2);
        assert_eq!(roulette_select(&weights, 0.999).unwrap(), 2);
    }

    #[test]
    fn test_boundary_draw_selects_reaching_candidate() {
        let weights = [1.0, 1.0];
        assert_eq!(roulette_select(&weights, 0.5).unwrap(), 0);
    }

    #[test]
    fn test_fall_through_takes_last_candidate() {
        // A draw at or past the accumulated mass lands on the last candidate.
        let weights = [1.0, 1.0, 1.0];
        assert_eq!(roulette_select(&weights, 1.0).unwrap(), 2);
        assert_eq!(roulette_select(&weights, 1.5).unwrap(), 2);
    }

    #[test]
    fn test_zero_total_weight_is_degenerate() {
        assert!(matches!(
            roulette_select(&[0.0, 0.0], 0.3),
            Err(Error::NumericDegeneracy(_))
        ));
        assert!(roulette_select(&[f64::NAN, 1.0], 0.3).is_err());
        assert!(roulette_select(&[], 0.3).is_err());
    }

    #[test]
    fn test_weights_near_max_do_not_overflow() {
        // raw sum is +inf; scaled: 2/3, 1
        let weights = [1.0e308, 1.5e308];
        assert_eq!(roulette_select(&weights, 0.3).unwrap(), 0);
        assert_eq!(roulette_select(&weights, 0.5).unwrap(), 1);
        assert_eq!(roulette_select(&weights, 0.999).unwrap(), 1);
    }

    #[test]
    fn test_infinite_weight_wins_without_draw() {
        let weights = [1.0, f64::INFINITY, f64::INFINITY];
        assert_eq!(roulette_select(&weights, 0.0).unwrap(), 1);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut untouched = rng.clone();
        assert_eq!(select_next(&weights, &mut rng).unwrap(), 1);
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_select_next_prefers_heavy_candidate() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let weights = [1.0, 1000.0];
        let heavy = (0..200)
            .filter(|_| select_next(&weights, &mut rng).unwrap() == 1)
            .count();
        assert!(heavy > 180, "heavy candidate chosen {} times", heavy);
    }
}
