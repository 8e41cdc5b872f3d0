//! Operations on categorical distributions over token indices.

use rand::Rng;

use crate::{
  scalar::Real,
  error::{ Result, PredictorError },
};


/// Check that a distribution has the expected length, contains only
/// finite non-negative values and sums to one within `tolerance`.

pub fn validate<R: Real>(distribution: &[R], size: usize, tolerance: R) -> std::result::Result<(), PredictorError> {
  if distribution.len() != size {
    return Err(PredictorError::new(format!(
      "Distribution has {} entries, expected {size}", distribution.len())))
  }
  if let Some(i) = distribution.iter().position(|p| !p.is_finite() || *p < R::zero() ) {
    return Err(PredictorError::new(format!(
      "Distribution entry {i} is not a probability: {:?}", distribution[i])))
  }
  let total: R = distribution.iter().copied().sum();
  if (total - R::one()).abs() > tolerance {
    return Err(PredictorError::new(format!("Distribution sums to {total:?}")))
  }
  Ok(())
}


/// Index of the most probable entry. Ties resolve to the lowest index.

pub fn argmax<R: Real>(distribution: &[R]) -> Option<usize> {
  let mut best: Option<(usize, R)> = None;
  for (i, &p) in distribution.iter().enumerate() {
    match best {
      Some((_, max)) if p <= max => {},
      _ => best = Some((i, p)),
    }
  }
  best.map(|(i, _)| i )
}


/// Sharpen or flatten a distribution: `p' = exp(ln(p) / temperature)`,
/// renormalized to sum to one.
///
/// Works in log space relative to the largest entry, which therefore always
/// rescales to one before normalization. Exact zeros stay exact zeros.

pub fn rescale<R: Real>(distribution: &[R], temperature: R) -> Result<Vec<R>> {
  let max_log = distribution.iter()
    .filter(|&&p| p > R::zero() )
    .map(|p| p.ln() )
    .fold(None, |max: Option<R>, l| Some(max.map_or(l, |m| m.max(l))) )
    .ok_or_else(|| PredictorError::new("Distribution has no probability mass"))?;

  let scaled: Vec<R> = distribution.iter().map(|&p| if p > R::zero() {
    ((p.ln() - max_log) / temperature).exp()
  } else {
    R::zero()
  }).collect();

  let total: R = scaled.iter().copied().sum();
  if !(total > R::zero()) || !total.is_finite() {
    return Err(PredictorError::new(format!("Rescaled distribution sums to {total:?}")).into())
  }
  Ok(scaled.into_iter().map(|p| p / total ).collect())
}


/// Draw a single sample from a categorical distribution.
///
/// Weights need not be normalized. Entries of zero weight are never drawn.

pub fn sample<R: Real, G: Rng + ?Sized>(distribution: &[R], rng: &mut G) -> Result<usize> {
  let total: R = distribution.iter().copied().sum();
  if !(total > R::zero()) || !total.is_finite() {
    return Err(PredictorError::new(format!("Cannot sample from weights summing to {total:?}")).into())
  }
  let threshold = rng.gen_range(R::zero(), total);
  let mut cumulative = R::zero();
  let mut last = None;
  for (i, &p) in distribution.iter().enumerate() {
    if p <= R::zero() { continue }
    cumulative = cumulative + p;
    last = Some(i);
    if threshold < cumulative { return Ok(i) }
  }
  // Rounding may leave the threshold just past the final sum
  last.ok_or_else(|| PredictorError::new("Distribution has no probability mass").into())
}
