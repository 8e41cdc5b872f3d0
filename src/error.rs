use thiserror::Error;

use crate::session::StopReason;


pub type Result<T> = std::result::Result<T, Error>;


/// Everything that can go wrong while encoding a seed or decoding text.

#[derive(Error, Debug)]
pub enum Error {
  #[error("Seed text encodes to zero tokens")]
  EmptySeed,

  #[error("Character {character:?} at position {position} is not part of the vocabulary")]
  UnknownCharacter { character: char, position: usize },

  #[error("Temperature must be finite and strictly positive, got {0}")]
  InvalidTemperature(f64),

  #[error("Sum tolerance must be finite and non-negative, got {0}")]
  InvalidTolerance(f64),

  #[error("Predictor failure")]
  PredictorFailure(#[from] PredictorError),

  #[error("Character {0:?} appears more than once in the vocabulary")]
  DuplicateCharacter(char),

  #[error("Session has already stopped: {0}")]
  SessionStopped(StopReason),

  #[error("Vocabulary could not be read or written")]
  Io(#[from] std::io::Error),

  #[error("Vocabulary could not be encoded or decoded")]
  Codec(#[from] postcard::Error),
}


/// Failure reported by, or detected in the output of, a
/// [Predictor](crate::Predictor).

#[derive(Error, Debug)]
#[error("{message}")]
pub struct PredictorError {
  message: String,
  #[source]
  source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PredictorError {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into(), source: None }
  }

  /// Wrap an error raised by the model behind a predictor.

  pub fn caused_by(message: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self { message: message.into(), source: Some(Box::new(source)) }
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}
