use serde::{Serialize, Deserialize};

use crate::{
  scalar::Real,
  distribution,
  error::{ Result, PredictorError },
};


/// A trained model, seen only through its predictions.
///
/// Given a sequence of token indices, a predictor returns one probability
/// distribution per input position, each over the entire index range of the
/// [Vocabulary](crate::Vocabulary). Decoding only ever looks at the last one.
///
/// Predictors are queried but never mutated by the decoders. Any closure
/// `Fn(&[usize]) -> Result<Vec<Vec<R>>, PredictorError>` is a predictor.

pub trait Predictor<R: Real> {
  fn predict(&self, tokens: &[usize]) -> std::result::Result<Vec<Vec<R>>, PredictorError>;

  /// Distribution over the token that follows `tokens`.

  fn predict_next(&self, tokens: &[usize]) -> std::result::Result<Vec<R>, PredictorError> {
    self.predict(tokens)?
      .pop()
      .ok_or_else(|| PredictorError::new(format!("No prediction for a sequence of {} tokens", tokens.len())))
  }
}

impl<R, F> Predictor<R> for F
where
  R: Real,
  F: Fn(&[usize]) -> std::result::Result<Vec<Vec<R>>, PredictorError>,
{
  fn predict(&self, tokens: &[usize]) -> std::result::Result<Vec<Vec<R>>, PredictorError> {
    self(tokens)
  }
}


/// First-order Markov predictor backed by a fixed table.
///
/// Row `i` holds the distribution over the token following token `i`,
/// so the table is square with one row per vocabulary index.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition<R: Real> {
  rows: Vec<Vec<R>>,
}

impl<R: Real> Transition<R> {
  /// Build a table from normalized rows.
  ///
  /// Row sums may deviate from one by the rounding error of summing
  /// `size` values at the precision of `R`, but never by less than `1e-6`.

  pub fn new(rows: Vec<Vec<R>>) -> Result<Self> {
    let size = rows.len();
    let floor = R::from(1e-6).unwrap_or_else(R::epsilon);
    let rounding = R::from(size).map_or(floor, |n| R::epsilon() * n );
    let tolerance = floor.max(rounding);
    for (i, row) in rows.iter().enumerate() {
      distribution::validate(row, size, tolerance)
        .map_err(|e| PredictorError::new(format!("Row {i}: {}", e.message())) )?;
    }
    Ok(Self { rows })
  }

  /// Deterministic table that always moves from token `i` to `next(i)`.

  pub fn cycle(size: usize, next: impl Fn(usize) -> usize) -> Result<Self> {
    let rows = (0..size).map(|i| {
      let mut row = vec![R::zero(); size];
      if let Some(p) = row.get_mut(next(i)) {
        *p = R::one();
      }
      row
    }).collect();
    Self::new(rows)
  }

  pub fn size(&self) -> usize {
    self.rows.len()
  }

  pub fn row(&self, token: usize) -> Option<&[R]> {
    self.rows.get(token).map(|row| row.as_slice() )
  }
}

impl<R: Real> Predictor<R> for Transition<R> {
  fn predict(&self, tokens: &[usize]) -> std::result::Result<Vec<Vec<R>>, PredictorError> {
    tokens.iter()
      .map(|&t| self.row(t)
        .map(|row| row.to_vec() )
        .ok_or_else(|| PredictorError::new(format!("Token {t} is outside of the transition table")) ))
      .collect()
  }

  fn predict_next(&self, tokens: &[usize]) -> std::result::Result<Vec<R>, PredictorError> {
    let last = tokens.last().ok_or_else(|| PredictorError::new("Cannot predict from an empty sequence"))?;
    self.row(*last)
      .map(|row| row.to_vec() )
      .ok_or_else(|| PredictorError::new(format!("Token {last} is outside of the transition table")))
  }
}
