use std::fs;
use std::path::Path;
use std::collections::HashMap;

use itertools::Itertools;

use crate::{
  config::UnknownPolicy,
  error::{ Error, Result },
};


/// Bidirectional mapping between characters and token indices.
///
/// Characters occupy the dense index range `1..=len`. Index 0 is left
/// unassigned and the index directly after the last character is
/// reserved as the end-of-sequence marker. Both decode to nothing.
///
/// A vocabulary is immutable once built and can be shared freely
/// between threads.

#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
  chars: Vec<char>,
  indices: HashMap<char, usize>,
}

impl Vocabulary {
  /// The unassigned index below the first character.
  pub const PADDING: usize = 0;

  /// Assign indices to characters in the order given.

  pub fn new(chars: impl IntoIterator<Item = char>) -> Result<Self> {
    let chars: Vec<char> = chars.into_iter().collect();
    let mut indices = HashMap::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
      if indices.insert(c, i + 1).is_some() {
        return Err(Error::DuplicateCharacter(c))
      }
    }
    Ok(Self { chars, indices })
  }

  /// Collect the distinct characters of a corpus, in sorted order.

  pub fn from_corpus(text: &str) -> Self {
    let chars: Vec<char> = text.chars().sorted().dedup().collect();
    let indices = chars.iter().enumerate().map(|(i, &c)| (c, i + 1) ).collect();
    Self { chars, indices }
  }

  /// Number of characters, not counting the reserved indices.

  pub fn len(&self) -> usize {
    self.chars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.chars.is_empty()
  }

  /// Length a predicted distribution must have to cover every index,
  /// end-of-sequence included.

  pub fn size(&self) -> usize {
    self.eos() + 1
  }

  pub fn eos(&self) -> usize {
    self.chars.len() + 1
  }

  pub fn index(&self, c: char) -> Option<usize> {
    self.indices.get(&c).copied()
  }

  pub fn char(&self, index: usize) -> Option<char> {
    if index == Self::PADDING { return None }
    self.chars.get(index - 1).copied()
  }

  pub fn chars(&self) -> &[char] {
    &self.chars
  }

  /// Encode text, silently dropping characters without an index.

  pub fn encode(&self, text: &str) -> Vec<usize> {
    text.chars().filter_map(|c| self.index(c) ).collect()
  }

  /// Encode text, failing on the first character without an index.

  pub fn encode_strict(&self, text: &str) -> Result<Vec<usize>> {
    text.chars()
      .enumerate()
      .map(|(position, character)| {
        self.index(character).ok_or(Error::UnknownCharacter { character, position })
      })
      .collect()
  }

  pub fn encode_with(&self, text: &str, policy: UnknownPolicy) -> Result<Vec<usize>> {
    match policy {
      UnknownPolicy::Skip => Ok(self.encode(text)),
      UnknownPolicy::Fail => self.encode_strict(text),
    }
  }

  /// Decode token indices back to text. Never fails: end-of-sequence,
  /// padding and out of range indices all decode to the empty string.

  pub fn decode(&self, tokens: &[usize]) -> String {
    tokens.iter().filter_map(|&t| self.char(t) ).collect()
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let bytes = fs::read(path)?;
    let dump: VocabularyDump = postcard::from_bytes(&bytes)?;
    Self::new(dump.chars)
  }

  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let dump = VocabularyDump { chars: self.chars.clone() };
    let data = postcard::to_allocvec(&dump)?;
    fs::write(path, data)?;
    Ok(())
  }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct VocabularyDump {
  chars: Vec<char>,
}
