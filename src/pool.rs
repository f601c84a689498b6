//! Phrase pool with non-repeating selection
//!
//! Phrases move from `available` to `recently_used` as they are picked.
//! Once `available` runs dry the whole recently-used set is recycled, so
//! every phrase is pasted once before any phrase repeats.

use crate::error::{Error, Result};
use rand::seq::IteratorRandom;
use std::collections::HashSet;

/// Phrases the macro starts with
pub const DEFAULT_PHRASES: &[&str] = &[
    "uwu", "UwU", "owo", "OwO", ">.>", "<.<", "-_-", "^-^", "v.v", "UwO", ":*", ":3", "~-~",
    "x3", "X3", ":)",
];

/// Phrases split into not-yet-used and used-this-cycle
///
/// The two sets are always disjoint and never both empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhrasePool {
    /// Phrases that can be picked next
    available: HashSet<String>,
    /// Phrases picked since the last cycle restart
    recently_used: HashSet<String>,
}

impl PhrasePool {
    /// Build a pool from a list of phrases
    ///
    /// # Returns
    /// `Error::EmptyInput` if `phrases` is empty
    pub fn new<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let available: HashSet<String> = phrases.into_iter().map(Into::into).collect();
        if available.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self {
            available,
            recently_used: HashSet::new(),
        })
    }

    /// Parse a comma-separated phrase list into a fresh pool
    ///
    /// Phrases keep their surrounding whitespace. Zero-length segments
    /// (`"a,,b"`) are skipped.
    pub fn from_csv(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        Self::new(raw.split(',').filter(|phrase| !phrase.is_empty()))
    }

    /// Pick a phrase that has not been used since the last cycle restart
    ///
    /// # Returns
    /// The phrase, now moved to `recently_used`
    ///
    /// # Errors
    /// `Error::EmptyPool` if the pool has no phrases at all
    pub fn select(&mut self) -> Result<String> {
        if self.available.is_empty() {
            self.available = std::mem::take(&mut self.recently_used);
        }

        let phrase = self
            .available
            .iter()
            .choose(&mut rand::rng())
            .cloned()
            .ok_or(Error::EmptyPool)?;

        self.available.remove(&phrase);
        self.recently_used.insert(phrase.clone());
        Ok(phrase)
    }

    /// Swap in a new comma-separated phrase list
    ///
    /// On error the current pool is left untouched.
    pub fn replace(&mut self, raw: &str) -> Result<()> {
        *self = Self::from_csv(raw)?;
        log::info!("Phrase pool replaced ({} phrases)", self.len());
        Ok(())
    }

    pub fn available(&self) -> &HashSet<String> {
        &self.available
    }

    pub fn recently_used(&self) -> &HashSet<String> {
        &self.recently_used
    }

    /// Every phrase in the pool, sorted for display
    pub fn phrases(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .available
            .union(&self.recently_used)
            .cloned()
            .collect();
        all.sort();
        all
    }

    pub fn len(&self) -> usize {
        self.available.len() + self.recently_used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PhrasePool {
    fn default() -> Self {
        Self {
            available: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
            recently_used: HashSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_exhausts_before_repeating() {
        let mut pool = PhrasePool::new(["a", "b"]).unwrap();

        let first = pool.select().unwrap();
        let second = pool.select().unwrap();
        assert_ne!(first, second);
        assert_eq!(set(&[first.as_str(), second.as_str()]), set(&["a", "b"]));
        assert!(pool.available().is_empty());

        let third = pool.select().unwrap();
        assert!(third == "a" || third == "b");
        assert_eq!(pool.recently_used().len(), 1);
        assert!(pool.recently_used().contains(&third));
        assert_eq!(pool.available().len(), 1);
    }

    #[test]
    fn test_single_phrase_repeats() {
        let mut pool = PhrasePool::new(["only"]).unwrap();
        for _ in 0..5 {
            assert_eq!(pool.select().unwrap(), "only");
        }
    }

    #[test]
    fn test_sets_stay_disjoint_and_complete() {
        let mut pool = PhrasePool::default();
        let all = pool.phrases();
        for _ in 0..(DEFAULT_PHRASES.len() * 3 + 1) {
            pool.select().unwrap();
            assert!(pool.available().is_disjoint(pool.recently_used()));
            assert_eq!(pool.phrases(), all);
        }
    }

    #[test]
    fn test_full_cycle_has_no_repeats() {
        let mut pool = PhrasePool::default();
        let picked: HashSet<String> = (0..DEFAULT_PHRASES.len())
            .map(|_| pool.select().unwrap())
            .collect();
        assert_eq!(picked.len(), DEFAULT_PHRASES.len());
    }

    #[test]
    fn test_replace_rejects_blank_input() {
        let mut pool = PhrasePool::new(["a", "b"]).unwrap();
        pool.select().unwrap();
        let before = pool.clone();

        assert_eq!(pool.replace(""), Err(Error::EmptyInput));
        assert_eq!(pool, before);
        assert_eq!(pool.replace("   "), Err(Error::EmptyInput));
        assert_eq!(pool, before);
    }

    #[test]
    fn test_replace_installs_parsed_set() {
        let mut pool = PhrasePool::default();
        pool.select().unwrap();

        pool.replace("x,y,z").unwrap();
        assert_eq!(pool.available(), &set(&["x", "y", "z"]));
        assert!(pool.recently_used().is_empty());
    }

    #[test]
    fn test_replace_preserves_whitespace() {
        let mut pool = PhrasePool::default();
        pool.replace("hi, there ,,yo").unwrap();
        assert_eq!(pool.available(), &set(&["hi", " there ", "yo"]));
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        assert_eq!(PhrasePool::new(Vec::<String>::new()), Err(Error::EmptyInput));
        assert_eq!(PhrasePool::from_csv(",,,"), Err(Error::EmptyInput));

        let mut drained = PhrasePool {
            available: HashSet::new(),
            recently_used: HashSet::new(),
        };
        assert_eq!(drained.select(), Err(Error::EmptyPool));
    }
}
