//! Passenger name extraction and roster disambiguation.

use regex::Regex;

use crate::models::ExtractMode;

use super::patterns::{
    GREETING, GREETING_STRICT, NAME_AFTER_RIDE_PHRASE, NAME_POSSESSIVE, NAME_THANKS,
};
use super::FieldExtractor;

/// Ordered roster of known passenger names.
///
/// Iteration order is the construction order, which fixes which of
/// several co-occurring names wins the anchored stage.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

#[derive(Debug, Clone)]
struct RosterEntry {
    name: String,
    anchored: Vec<Regex>,
}

impl Roster {
    /// Build a roster, compiling the per-name anchored patterns.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = names
            .into_iter()
            .map(|name| {
                let name = name.into();
                let escaped = regex::escape(&name);
                let anchored = vec![
                    Regex::new(&format!(r"Tack\s+{escaped}!")).unwrap(),
                    Regex::new(&format!(r"{escaped}s\s+(?:resa|tur)")).unwrap(),
                    Regex::new(&format!(r"(?:reser|åker|färd|resa).*?,\s+{escaped}")).unwrap(),
                ];
                RosterEntry { name, anchored }
            })
            .collect();

        Self { entries }
    }

    /// Names in disambiguation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Exact-casing membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Case-insensitive lookup returning the stored casing.
    pub fn canonical(&self, candidate: &str) -> Option<&str> {
        let lowered = candidate.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.name.to_lowercase() == lowered)
            .map(|e| e.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Passenger name extractor.
pub struct PassengerExtractor<'a> {
    roster: &'a Roster,
}

impl<'a> PassengerExtractor<'a> {
    pub fn new(roster: &'a Roster) -> Self {
        Self { roster }
    }
}

impl FieldExtractor for PassengerExtractor<'_> {
    type Output = String;

    fn extract(&self, text: &str, mode: ExtractMode) -> Option<String> {
        // Stage a: greeting phrase naming the passenger directly.
        let greeting = match mode {
            ExtractMode::Lenient => &*GREETING,
            ExtractMode::Strict => &*GREETING_STRICT,
        };
        if let Some(caps) = greeting.captures(text) {
            return Some(caps[1].trim().to_string());
        }

        if mode == ExtractMode::Strict {
            return None;
        }

        // Stage b: anchored per-name patterns, in roster order.
        for entry in &self.roster.entries {
            if entry.anchored.iter().any(|re| re.is_match(text)) {
                return Some(entry.name.clone());
            }
        }

        // Stage c: generic captures, canonicalized against the roster
        // when they match a known name case-insensitively.
        for pattern in [&*NAME_THANKS, &*NAME_AFTER_RIDE_PHRASE, &*NAME_POSSESSIVE] {
            if let Some(caps) = pattern.captures(text) {
                let candidate = caps[1].trim();
                return Some(
                    self.roster
                        .canonical(candidate)
                        .unwrap_or(candidate)
                        .to_string(),
                );
            }
        }

        None
    }
}

/// Extract the passenger name from body text.
pub fn extract_passenger(text: &str, roster: &Roster, mode: ExtractMode) -> Option<String> {
    PassengerExtractor::new(roster).extract(text, mode)
}
