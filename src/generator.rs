use rand::{ Rng, SeedableRng, rngs::StdRng };
use tracing::{ debug, trace };

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{
  scalar::Real,
  distribution,
  vocab::Vocabulary,
  predictor::Predictor,
  config::GenerationConfig,
  session::{ Session, StopReason },
  strategy::{ Strategy, Greedy, Temperature },
  error::{ Result, PredictorError },
};


/// Outcome of a single decoding session.

#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
  /// Seed followed by the generated continuation.
  pub text: String,
  /// Seed and generated token indices. Never contains end-of-sequence.
  pub tokens: Vec<usize>,
  /// Number of tokens generated beyond the seed.
  pub appended: usize,
  pub stop: StopReason,
}


/// Autoregressive text generator.
///
/// Encodes a seed, then repeatedly asks a [Predictor] for the distribution
/// over the next token and lets a [Strategy] pick from it, until the
/// end-of-sequence token comes up or the length budget is spent.

#[derive(Debug, Clone)]
pub struct Generator<'a> {
  vocab: &'a Vocabulary,
  config: GenerationConfig,
}

impl<'a> Generator<'a> {
  pub fn new(vocab: &'a Vocabulary) -> Self {
    Self::with_config(vocab, GenerationConfig::default())
  }

  pub fn with_config(vocab: &'a Vocabulary, config: GenerationConfig) -> Self {
    Self { vocab, config }
  }

  pub fn vocab(&self) -> &Vocabulary {
    self.vocab
  }

  pub fn config(&self) -> &GenerationConfig {
    &self.config
  }

  /// Deterministic decoding, always picking the most probable token.
  ///
  /// The returned text starts with the seed as the vocabulary decodes it.
  /// Under [UnknownPolicy::Skip](crate::UnknownPolicy::Skip) characters
  /// missing from the vocabulary are therefore absent from the output,
  /// even when nothing gets generated.

  pub fn generate<R, P>(&self, predictor: &P, seed: &str, max_length: usize) -> Result<String>
  where
    R: Real,
    P: Predictor<R> + ?Sized,
  {
    Ok(self.run(predictor, seed, max_length, &mut Greedy)?.text)
  }

  /// Stochastic decoding, sampling every token from the predicted
  /// distribution rescaled by `temperature`.

  pub fn generate_soft<R, P, G>(&self, predictor: &P, seed: &str, max_length: usize, temperature: R, rng: &mut G) -> Result<String>
  where
    R: Real,
    P: Predictor<R> + ?Sized,
    G: Rng + ?Sized,
  {
    let mut strategy = Temperature::new(temperature, rng)?;
    Ok(self.run(predictor, seed, max_length, &mut strategy)?.text)
  }

  /// Run one decoding session with an arbitrary strategy.

  pub fn run<R, P, S>(&self, predictor: &P, seed: &str, max_length: usize, strategy: &mut S) -> Result<Generation>
  where
    R: Real,
    P: Predictor<R> + ?Sized,
    S: Strategy<R> + ?Sized,
  {
    self.config.validate()?;
    let seed = self.vocab.encode_with(seed, self.config.unknown_policy)?;
    let mut session = Session::new(seed, max_length, self.vocab.eos())?;
    debug!(seed_tokens = session.tokens().len(), max_length, "Starting decoding session");

    let size = self.vocab.size();
    let tolerance = R::from(self.config.tolerance)
      .ok_or_else(|| PredictorError::new("Tolerance cannot be represented"))?;

    let stop = loop {
      if let Some(reason) = session.stop_reason() { break reason }
      let distribution = predictor.predict_next(session.tokens())?;
      distribution::validate(&distribution, size, tolerance)?;
      let padding = distribution[Vocabulary::PADDING];
      if padding > R::zero() {
        return Err(PredictorError::new(format!(
          "Distribution puts {padding:?} on the unassigned index {}", Vocabulary::PADDING)).into())
      }
      let token = strategy.select(&distribution)?;
      trace!(step = session.generated().len(), token, "Selected token");
      session.advance(token)?;
    };
    debug!(appended = session.generated().len(), %stop, "Decoding session stopped");

    let appended = session.generated().len();
    let tokens = session.into_tokens();
    Ok(Generation {
      text: self.vocab.decode(&tokens),
      tokens,
      appended,
      stop,
    })
  }

  /// Sample one continuation per temperature.
  ///
  /// Session `i` draws from its own generator seeded with `base_seed + i`,
  /// so results are reproducible and independent of execution order. With
  /// the `rayon` feature enabled, sessions run in parallel.

  pub fn generate_batch<R, P>(&self, predictor: &P, seed: &str, max_length: usize, temperatures: &[R], base_seed: u64) -> Result<Vec<Generation>>
  where
    R: Real,
    P: Predictor<R> + Sync + ?Sized,
  {
    let run_one = |(i, &temperature): (usize, &R)| -> Result<Generation> {
      let rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
      let mut strategy = Temperature::new(temperature, rng)?;
      self.run(predictor, seed, max_length, &mut strategy)
    };

    #[cfg(feature = "rayon")]
    let generations = temperatures.par_iter().enumerate().map(run_one).collect();

    #[cfg(not(feature = "rayon"))]
    let generations = temperatures.iter().enumerate().map(run_one).collect();

    generations
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::{ Error, config::UnknownPolicy, predictor::Transition };

  fn abc() -> Vocabulary {
    Vocabulary::new("abc".chars()).unwrap()
  }

  // a -> b -> c -> eos
  fn chain() -> Transition<f64> {
    Transition::cycle(5, |i| if i == 0 { 1 } else { (i + 1).min(4) }).unwrap()
  }

  #[test]
  fn greedy_follows_chain() {
    let vocab = abc();
    let generator = Generator::new(&vocab);
    let generation = generator.run(&chain(), "a", 5, &mut Greedy).unwrap();
    assert_eq!(generation.text, "abc");
    assert_eq!(generation.tokens, vec![1, 2, 3]);
    assert_eq!(generation.appended, 2);
    assert_eq!(generation.stop, StopReason::EndOfSequenceEmitted);
  }

  #[test]
  fn budget() {
    let vocab = abc();
    let generator = Generator::new(&vocab);
    let generation = generator.run(&chain(), "a", 1, &mut Greedy).unwrap();
    assert_eq!(generation.text, "ab");
    assert_eq!(generation.stop, StopReason::MaxLengthReached);
  }

  #[test]
  fn unknown_policy() {
    let vocab = abc();
    let lenient = Generator::new(&vocab);
    assert_eq!(lenient.generate(&chain(), "xa", 5).unwrap(), "abc");
    assert!(matches!(lenient.generate(&chain(), "xyz", 5), Err(Error::EmptySeed)));

    let strict = Generator::with_config(&vocab, GenerationConfig::default().unknown_policy(UnknownPolicy::Fail));
    assert!(matches!(strict.generate(&chain(), "xa", 5),
      Err(Error::UnknownCharacter { character: 'x', position: 0 })));
  }

  #[test]
  fn unknown_seed_characters_are_dropped() {
    let vocab = abc();
    let generator = Generator::new(&vocab);
    assert_eq!(generator.generate(&chain(), "a-b", 0).unwrap(), "ab");
    let generation = generator.run(&chain(), "a-b", 0, &mut Greedy).unwrap();
    assert_eq!(generation.tokens, vec![1, 2]);
    assert_eq!(generation.appended, 0);
  }

  #[test]
  fn invalid_tolerance() {
    let vocab = abc();
    for tolerance in [f64::NAN, -0.5] {
      let generator = Generator::with_config(&vocab, GenerationConfig::default().tolerance(tolerance));
      assert!(matches!(generator.generate(&chain(), "a", 5), Err(Error::InvalidTolerance(_))));
    }
  }

  #[test]
  fn batch_is_reproducible() {
    let vocab = abc();
    let generator = Generator::new(&vocab);
    let uniform = Transition::new(vec![vec![0.0, 0.25, 0.25, 0.25, 0.25]; 5]).unwrap();
    let temperatures = [0.5, 1.0, 2.0];
    let first = generator.generate_batch(&uniform, "ab", 8, &temperatures, 99).unwrap();
    let second = generator.generate_batch(&uniform, "ab", 8, &temperatures, 99).unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    for generation in &first {
      assert!(generation.text.starts_with("ab"));
      assert!(generation.appended <= 8);
    }
  }

  #[test]
  fn batch_rejects_invalid_temperature() {
    let vocab = abc();
    let generator = Generator::new(&vocab);
    let result = generator.generate_batch(&chain(), "a", 3, &[1.0, 0.0], 0);
    assert!(matches!(result, Err(Error::InvalidTemperature(_))));
  }
}
