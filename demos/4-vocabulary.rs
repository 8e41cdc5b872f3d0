// This example demonstrates building, encoding with and persisting a vocabulary.

// Characters outside the vocabulary are dropped by default. A strict policy
// reports them instead, either directly on the vocabulary or for all seeds
// handed to a generator.

use microgen::{ Vocabulary, Generator, GenerationConfig, UnknownPolicy, Transition };

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let filename = "vocab.bin";

  let vocab = Vocabulary::from_corpus("hello world");
  println!("{} characters, end-of-sequence at {}", vocab.len(), vocab.eos());

  let tokens = vocab.encode("hello, world!");
  println!("lenient: {tokens:?} -> {:?}", vocab.decode(&tokens));
  println!("strict:  {}", vocab.encode_strict("hello, world!").unwrap_err());

  // Save to disc and load it elsewhere
  vocab.save(filename).unwrap();
  let loaded = Vocabulary::load(filename).unwrap();
  assert_eq!(loaded, vocab);
  std::fs::remove_file(filename).unwrap();

  // Generators apply the configured policy to their seeds
  let predictor = Transition::<f64>::cycle(loaded.size(), |_| loaded.eos()).unwrap();
  let strict = Generator::with_config(&loaded, GenerationConfig::default().unknown_policy(UnknownPolicy::Fail));
  println!("seed 'hello!': {}", strict.generate(&predictor, "hello!", 10).unwrap_err());
  println!("seed 'hello':  {:?}", strict.generate(&predictor, "hello", 10).unwrap());
}
