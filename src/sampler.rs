//! Weighted random selection.
//!
//! Draws one item with probability `weights[i] / sum(weights)` by picking a
//! uniform point on the cumulative weight range and walking the prefix sums.
//! Zero-weight items occupy no room on that range and are never returned.

use crate::error::{PlaylistError, Result};
use log::trace;
use rand::Rng;

/// Draw one item from `items`, proportionally to `weights`.
///
/// # Errors
///
/// Returns [`PlaylistError::InvalidWeights`] if the slices differ in length,
/// any weight is negative or not finite, or no weight is positive.
pub fn sample<'a, T, R>(items: &'a [T], weights: &[f64], rng: &mut R) -> Result<&'a T>
where
    R: Rng + ?Sized,
{
    if items.len() != weights.len() {
        return Err(PlaylistError::InvalidWeights(format!(
            "{} items but {} weights",
            items.len(),
            weights.len()
        )));
    }
    let index = sample_index(weights, rng)?;
    Ok(&items[index])
}

/// Same as [`sample`] but returns the chosen position.
///
/// # Errors
///
/// See [`sample`].
pub fn sample_index<R>(weights: &[f64], rng: &mut R) -> Result<usize>
where
    R: Rng + ?Sized,
{
    let total = total_weight(weights)?;
    let target = rng.gen_range(0.0..total);
    trace!("Sampling point {target:.4} of {total:.4} across {} weights", weights.len());

    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (index, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = Some(index);
        if target < cumulative {
            return Ok(index);
        }
    }

    // Float rounding can leave `target` a hair past the final prefix sum.
    last_positive.ok_or_else(|| PlaylistError::InvalidWeights("no positive weight".to_string()))
}

/// Sum of `weights`, after checking they form a usable distribution.
fn total_weight(weights: &[f64]) -> Result<f64> {
    if let Some((index, weight)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(PlaylistError::InvalidWeights(format!(
            "weight #{index} is {weight}"
        )));
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(PlaylistError::InvalidWeights(format!(
            "no positive weight among {} candidates",
            weights.len()
        )));
    }
    if !total.is_finite() {
        return Err(PlaylistError::InvalidWeights("weights overflow".to_string()));
    }

    Ok(total)
}
