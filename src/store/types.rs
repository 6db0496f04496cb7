use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use super::filter::PlanetFilter;
use crate::catalog::PlanetInput;
use crate::scoring::PlanetResult;

pub const STORE_VERSION: u32 = 1;

/// A stored planet: catalog parameters merged with their scoring result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    #[serde(flatten)]
    pub input: PlanetInput,
    #[serde(flatten)]
    pub result: PlanetResult,
    pub saved_at: DateTime<Utc>,
}

impl PlanetRecord {
    pub fn new(input: PlanetInput, result: PlanetResult) -> Self {
        Self {
            input,
            result,
            saved_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.input.name
    }

    /// Listing order: best score first, ties by name
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        other
            .result
            .score
            .partial_cmp(&self.result.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.name().cmp(other.name()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Everything the store persists: planets keyed by name, favorites, notes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreState {
    pub version: u32,
    #[serde(default)]
    pub planets: BTreeMap<String, PlanetRecord>,
    #[serde(default)]
    pub favorites: BTreeSet<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreState {
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            planets: BTreeMap::new(),
            favorites: BTreeSet::new(),
            notes: Vec::new(),
        }
    }

    /// Upsert records by name; a later record replaces an earlier one.
    /// Returns how many records were written.
    pub fn save<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = PlanetRecord>,
    {
        let mut count = 0;
        for record in records {
            self.planets.insert(record.name().to_string(), record);
            count += 1;
        }
        count
    }

    /// Records matching the filter, best score first (ties by name), at most `limit`
    pub fn query(&self, filter: &PlanetFilter, limit: usize) -> Vec<&PlanetRecord> {
        let mut matches: Vec<&PlanetRecord> =
            self.planets.values().filter(|r| filter.matches(r)).collect();
        matches.sort_by(|a, b| a.cmp_rank(b));
        matches.truncate(limit);
        matches
    }

    pub fn get(&self, name: &str) -> Option<&PlanetRecord> {
        self.planets.get(name)
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    /// Mark a planet as favorite. Returns false if it already was.
    pub fn favorite(&mut self, name: &str) -> bool {
        self.favorites.insert(name.to_string())
    }

    /// Returns true if the planet was a favorite
    pub fn unfavorite(&mut self, name: &str) -> bool {
        self.favorites.remove(name)
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.contains(name)
    }

    /// Favorite names in sorted order
    pub fn favorites(&self) -> Vec<&str> {
        self.favorites.iter().map(String::as_str).collect()
    }

    /// Append a note for a planet. Blank text is rejected.
    pub fn add_note(&mut self, name: &str, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            bail!("Note text cannot be empty");
        }
        self.notes.push(Note {
            name: name.to_string(),
            text: text.to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    /// Notes for a planet, most recent first
    pub fn notes(&self, name: &str) -> Vec<&Note> {
        self.notes.iter().rev().filter(|n| n.name == name).collect()
    }
}
