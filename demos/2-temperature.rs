// This example demonstrates how temperature changes sampled text.

// Low temperatures stick to the most likely continuation, high temperatures
// wander off towards a uniform choice among all characters. The random source
// is passed in explicitly, so seeding it makes every run reproducible.

use microgen::{ Vocabulary, Generator, Transition };
use rand::{ SeedableRng, rngs::StdRng };

const CORPUS: &str = "the quick brown fox jumps over the lazy dog";

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let vocab = Vocabulary::from_corpus(CORPUS);
  let predictor = successors(&vocab, CORPUS);
  let generator = Generator::new(&vocab);

  println!("greedy -> {:?}", generator.generate(&predictor, "the", 40).unwrap());

  let mut rng = StdRng::seed_from_u64(1234);
  for temperature in [0.2, 0.5, 1.0, 1.2, 5.0] {
    let text = generator.generate_soft(&predictor, "the", 40, temperature, &mut rng).unwrap();
    println!("{temperature:>6} -> {text:?}");
  }

  // Temperatures must be strictly positive
  let error = generator.generate_soft(&predictor, "the", 40, 0.0, &mut rng).unwrap_err();
  println!("   0.0 -> {error}");
}

fn successors(vocab: &Vocabulary, corpus: &str) -> Transition<f64> {
  let size = vocab.size();
  let mut counts = vec![vec![0.05; size]; size];
  let tokens = vocab.encode(corpus);
  for pair in tokens.windows(2) {
    counts[pair[0]][pair[1]] += 1.0;
  }
  counts[*tokens.last().unwrap()][vocab.eos()] += 1.0;
  // Index 0 is never emitted
  for row in counts.iter_mut() {
    row[Vocabulary::PADDING] = 0.0;
  }
  let rows = counts.into_iter().map(|row| {
    let total: f64 = row.iter().sum();
    row.into_iter().map(|c| c / total ).collect()
  }).collect();
  Transition::new(rows).unwrap()
}
