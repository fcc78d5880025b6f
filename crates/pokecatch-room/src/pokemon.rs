//! The Pokemon a mission is about.

use std::fmt;

use serde::Serialize;

use crate::RoomError;

/// The nine Pokemon a run picks its target from.
pub const WILD_POKEMON: [&str; 9] = [
    "Pikachu",
    "Bulbasaur",
    "Charmander",
    "Squirtle",
    "Eevee",
    "Jigglypuff",
    "Meowth",
    "Psyduck",
    "Snorlax",
];

/// Where missions take place unless configured otherwise.
pub const DEFAULT_LOCATION: &str = "Viridian Forest";

/// A Pokemon and where to find it. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pokemon {
    name: String,
    location: String,
}

impl Pokemon {
    /// Both fields are trimmed before they are stored.
    ///
    /// # Errors
    /// Returns [`RoomError::InvalidPokemon`] if either the name or the
    /// location is empty or only whitespace.
    pub fn new(name: &str, location: &str) -> Result<Self, RoomError> {
        let (n, l) = (name.trim(), location.trim());
        if n.is_empty() || l.is_empty() {
            return Err(RoomError::InvalidPokemon {
                name: name.to_string(),
                location: location.to_string(),
            });
        }
        Ok(Self {
            name: n.to_string(),
            location: l.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl fmt::Display for Pokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.name, self.location)
    }
}
