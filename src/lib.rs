//! Character-level text generation from next-token predictors.
//! Tiny. Few dependencies. Model agnostic.
//!
//! # Features
//!
//! - **Opaque models**: Anything that maps a sequence of token indices to
//! per-position probability distributions is a [Predictor], closures included.
//!
//! - **Greedy & temperature decoding**: Pick the most probable character every
//! step, or sample from a distribution sharpened or flattened by a temperature.
//!
//! - **Explicit randomness**: Samplers draw from an injected [rand::Rng], so
//! seeded runs are reproducible and no global random state is involved.
//!
//! - **Fail fast**: Malformed predictions, empty seeds and invalid temperatures
//! surface as an [Error] instead of producing undefined samples.
//!
//! - **Batches**: Generate continuations at several temperatures at once,
//! optionally in parallel.
//!
//! # Examples
//!
//! Decoding from a fixed transition table:
//! ```
//! use microgen::{ Vocabulary, Generator, Transition, StopReason, Greedy };
//! use rand::{ SeedableRng, rngs::StdRng };
//!
//! let vocab = Vocabulary::new("abc".chars()).unwrap();
//! assert_eq!(vocab.eos(), 4);
//!
//! // Every character is followed by the next one, 'c' by end-of-sequence
//! let predictor = Transition::<f64>::cycle(vocab.size(), |i| (i + 1).min(vocab.eos())).unwrap();
//!
//! let generator = Generator::new(&vocab);
//! assert_eq!(generator.generate(&predictor, "a", 10).unwrap(), "abc");
//!
//! // Cold sampling behaves like greedy decoding
//! let mut rng = StdRng::seed_from_u64(1);
//! assert_eq!(generator.generate_soft(&predictor, "b", 10, 0.1, &mut rng).unwrap(), "bc");
//!
//! let generation = generator.run(&predictor, "a", 1, &mut Greedy).unwrap();
//! assert_eq!(generation.text, "ab");
//! assert_eq!(generation.stop, StopReason::MaxLengthReached);
//! ```
//!
//! ## More examples
//! Check the `/demos` folder for more example code.
//!
//!
//! # Optional features
//!
//! Some features can be toggled in your `Cargo.toml`.
//!
//! - `rayon`: Run the sessions of [Generator::generate_batch] on the rayon thread pool.

mod error;
mod config;
mod vocab;
mod predictor;
mod session;
mod strategy;
mod generator;

pub mod scalar;
pub mod distribution;

pub use error::{ Error, Result, PredictorError };
pub use config::{ GenerationConfig, UnknownPolicy };
pub use vocab::Vocabulary;
pub use predictor::{ Predictor, Transition };
pub use session::{ Session, State, StopReason };
pub use strategy::{ Strategy, Greedy, Temperature };
pub use generator::{ Generator, Generation };
