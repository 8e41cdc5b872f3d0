// This example demonstrates greedy decoding with a toy predictor.

// A real application would wrap a trained recurrent network here. Any type
// implementing Predictor will do, as long as it returns one probability for
// every index of the vocabulary.

use microgen::{ Vocabulary, Generator, Transition, Greedy };

const PHRASE: &str = "to be or not to be";

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  // Every distinct character of the phrase gets an index
  let vocab = Vocabulary::from_corpus(PHRASE);

  // Predict each character from its predecessor in the phrase
  let predictor = successors(&vocab, PHRASE);

  let generator = Generator::new(&vocab);

  // Greedy decoding is deterministic: same seed, same text
  for seed in ["t", "be", "no"] {
    let generation = generator.run(&predictor, seed, 24, &mut Greedy).unwrap();
    println!("{seed:>3} -> {:?} ({})", generation.text, generation.stop);
  }
}

// Successor frequencies with a little smoothing, ending in end-of-sequence
fn successors(vocab: &Vocabulary, phrase: &str) -> Transition<f64> {
  let size = vocab.size();
  let mut counts = vec![vec![0.01; size]; size];
  let tokens = vocab.encode(phrase);
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
