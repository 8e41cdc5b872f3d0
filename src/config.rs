use serde::{Serialize, Deserialize};

use crate::error::{ Error, Result };


/// How seed characters that are missing from the vocabulary get treated.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnknownPolicy {
  /// Drop the character and keep encoding.
  #[default]
  Skip,
  /// Fail with [Error::UnknownCharacter](crate::Error::UnknownCharacter).
  Fail,
}


/// Settings shared by all sessions of a [Generator](crate::Generator).

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
  pub unknown_policy: UnknownPolicy,
  /// Largest accepted deviation of a predicted distribution's sum from one.
  pub tolerance: f64,
}

impl GenerationConfig {
  pub fn unknown_policy(mut self, policy: UnknownPolicy) -> Self {
    self.unknown_policy = policy;
    self
  }

  pub fn tolerance(mut self, tolerance: f64) -> Self {
    self.tolerance = tolerance;
    self
  }

  /// Reject settings no session could run with.

  pub fn validate(&self) -> Result<()> {
    if !self.tolerance.is_finite() || self.tolerance < 0.0 {
      return Err(Error::InvalidTolerance(self.tolerance))
    }
    Ok(())
  }
}

impl Default for GenerationConfig {
  fn default() -> Self {
    Self {
      unknown_policy: UnknownPolicy::Skip,
      tolerance: 1e-3,
    }
  }
}
