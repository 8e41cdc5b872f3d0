use serde::{Serialize, Deserialize};

use crate::error::{ Error, Result };


/// Why a decoding session ended.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopReason {
  MaxLengthReached,
  EndOfSequenceEmitted,
}

impl std::fmt::Display for StopReason {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Self::MaxLengthReached => write!(f, "maximum length reached"),
      Self::EndOfSequenceEmitted => write!(f, "end of sequence emitted"),
    }
  }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  Running,
  Stopped(StopReason),
}


/// Loop controller shared by all decoding strategies.
///
/// Holds the growing token sequence and decides after every selected token
/// whether decoding continues. Tokens are only ever appended, and once
/// stopped a session accepts no further tokens.

#[derive(Debug, Clone)]
pub struct Session {
  tokens: Vec<usize>,
  seed_len: usize,
  max_length: usize,
  eos: usize,
  state: State,
}

impl Session {
  pub fn new(seed: Vec<usize>, max_length: usize, eos: usize) -> Result<Self> {
    if seed.is_empty() { return Err(Error::EmptySeed) }
    let state = if max_length == 0 {
      State::Stopped(StopReason::MaxLengthReached)
    } else {
      State::Running
    };
    Ok(Self {
      seed_len: seed.len(),
      tokens: seed,
      max_length,
      eos,
      state,
    })
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn is_running(&self) -> bool {
    self.state == State::Running
  }

  pub fn stop_reason(&self) -> Option<StopReason> {
    match self.state {
      State::Running => None,
      State::Stopped(reason) => Some(reason),
    }
  }

  /// Seed and generated tokens, in order.

  pub fn tokens(&self) -> &[usize] {
    &self.tokens
  }

  pub fn generated(&self) -> &[usize] {
    &self.tokens[self.seed_len..]
  }

  pub fn into_tokens(self) -> Vec<usize> {
    self.tokens
  }

  /// Feed the token selected for the next position.
  ///
  /// The end-of-sequence token stops the session without being appended.
  /// Any other token gets appended, stopping the session once the
  /// generation budget is used up.

  pub fn advance(&mut self, token: usize) -> Result<State> {
    if let State::Stopped(reason) = self.state {
      return Err(Error::SessionStopped(reason))
    }
    self.state = if token == self.eos {
      State::Stopped(StopReason::EndOfSequenceEmitted)
    } else {
      self.tokens.push(token);
      if self.generated().len() >= self.max_length {
        State::Stopped(StopReason::MaxLengthReached)
      } else {
        State::Running
      }
    };
    Ok(self.state)
  }
}
