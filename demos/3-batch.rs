// This example demonstrates generating several samples at once.

// Each temperature gets its own decoding session with a random generator
// derived from a common base seed. Build with `--features rayon` to run
// the sessions in parallel; results stay the same either way.

use microgen::{ Vocabulary, Generator, GenerationConfig, Predictor, PredictorError };

// Prefers the character after the last one in the alphabet,
// with a growing chance of ending the text
struct Alphabet {
  size: usize,
  eos: usize,
}

impl Predictor<f32> for Alphabet {
  fn predict(&self, tokens: &[usize]) -> Result<Vec<Vec<f32>>, PredictorError> {
    let last = *tokens.last().ok_or_else(|| PredictorError::new("Empty sequence"))?;
    let stop = (tokens.len() as f32 / 40.0).min(0.5);
    let mut p = vec![(1.0 - stop) * 0.2 / (self.size - 3) as f32; self.size];
    p[0] = 0.0;
    let next = if last + 1 >= self.eos { 1 } else { last + 1 };
    p[next] += (1.0 - stop) * 0.8;
    p[self.eos] = stop;
    let total: f32 = p.iter().sum();
    Ok(vec![p.into_iter().map(|x| x / total ).collect()])
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let vocab = Vocabulary::new('a'..='z').unwrap();
  let predictor = Alphabet { size: vocab.size(), eos: vocab.eos() };

  let generator = Generator::with_config(&vocab, GenerationConfig::default().tolerance(1e-4));
  let temperatures = [0.1, 0.5, 1.0, 2.0];
  let generations = generator.generate_batch(&predictor, "abc", 60, &temperatures, 42).unwrap();

  for (temperature, generation) in temperatures.iter().zip(&generations) {
    println!("{temperature:>4} -> {} (+{}, {})", generation.text, generation.appended, generation.stop);
  }
}
