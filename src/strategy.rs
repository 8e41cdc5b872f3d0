use rand::Rng;

use crate::{
  scalar::Real,
  distribution,
  error::{ Error, Result, PredictorError },
};


/// A rule for picking the next token from a predicted distribution,
/// to be used with a [Generator](crate::Generator).
///
/// Distributions handed to a strategy have already been validated.

pub trait Strategy<R: Real> {
  fn select(&mut self, distribution: &[R]) -> Result<usize>;
}


/// Always pick the most probable token. Ties resolve to the lowest index.

#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl<R: Real> Strategy<R> for Greedy {
  fn select(&mut self, distribution: &[R]) -> Result<usize> {
    distribution::argmax(distribution)
      .ok_or_else(|| PredictorError::new("Cannot select from an empty distribution").into())
  }
}


/// Sample from the distribution after rescaling it by a temperature.
///
/// Temperatures close to zero approach [Greedy] selection, large
/// temperatures approach a uniform choice among all tokens of nonzero
/// probability. Owns its random source, so every session draws from
/// its own, possibly seeded, generator.

#[derive(Debug, Clone)]
pub struct Temperature<R: Real, G: Rng> {
  temperature: R,
  rng: G,
}

impl<R: Real, G: Rng> Temperature<R, G> {
  pub fn new(temperature: R, rng: G) -> Result<Self> {
    if !(temperature > R::zero()) || !temperature.is_finite() {
      return Err(Error::InvalidTemperature(temperature.to_f64().unwrap_or(f64::NAN)))
    }
    Ok(Self { temperature, rng })
  }

  pub fn temperature(&self) -> R {
    self.temperature
  }

  pub fn into_rng(self) -> G {
    self.rng
  }
}

impl<R: Real, G: Rng> Strategy<R> for Temperature<R, G> {
  fn select(&mut self, distribution: &[R]) -> Result<usize> {
    let rescaled = distribution::rescale(distribution, self.temperature)?;
    distribution::sample(&rescaled, &mut self.rng)
  }
}


#[cfg(test)]
mod tests {
  use rand::{ SeedableRng, rngs::StdRng };

  use super::*;

  #[test]
  fn greedy() {
    assert_eq!(Greedy.select(&[0.0, 0.2, 0.5, 0.3]).unwrap(), 2);
    assert!(Strategy::<f32>::select(&mut Greedy, &[]).is_err());
  }

  #[test]
  fn invalid_temperatures() {
    for t in [0.0, -1.0, f64::NAN, f64::INFINITY] {
      let rng = StdRng::seed_from_u64(0);
      assert!(matches!(Temperature::new(t, rng), Err(Error::InvalidTemperature(_))));
    }
  }

  #[test]
  fn cold_sampling_is_greedy() {
    let mut strategy = Temperature::new(0.01, StdRng::seed_from_u64(3)).unwrap();
    for _ in 0..100 {
      assert_eq!(strategy.select(&[0.0, 0.3, 0.4, 0.3]).unwrap(), 2);
    }
  }

  #[test]
  fn seeded_sampling_repeats() {
    let p = [0.0, 0.25, 0.25, 0.25, 0.25];
    let draw = |seed| {
      let mut strategy = Temperature::new(1.0, StdRng::seed_from_u64(seed)).unwrap();
      (0..32).map(|_| strategy.select(&p).unwrap() ).collect::<Vec<_>>()
    };
    assert_eq!(draw(11), draw(11));
  }
}
