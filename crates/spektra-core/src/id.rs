use std::collections::HashSet;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Length of a generated stop id.
pub const ID_LEN: usize = 9;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque identifier of a color stop.
///
/// Ids carry no ordering meaning; they only address a stop for the lifetime
/// of an editing session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for StopId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ── StopIdGen ─────────────────────────────────────────────────────────────

/// Session-scoped id source.
///
/// Draws random base-36 tokens and remembers every id it has issued or been
/// told about, re-drawing on collision. Uniqueness holds for the lifetime of
/// the generator, not across processes.
#[derive(Debug)]
pub struct StopIdGen {
    rng: StdRng,
    issued: HashSet<StopId>,
}

impl StopIdGen {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Deterministic generator for tests and reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self { rng, issued: HashSet::new() }
    }

    /// Returns a fresh id that differs from every id seen so far.
    pub fn next_id(&mut self) -> StopId {
        loop {
            let token: String = (0..ID_LEN)
                .map(|_| ALPHABET[self.rng.random_range(0..ALPHABET.len())] as char)
                .collect();
            let id = StopId(token);
            if self.issued.insert(id.clone()) {
                log::trace!("issued stop id {id}");
                return id;
            }
            log::trace!("stop id collision on {id}, redrawing");
        }
    }

    /// Marks an externally created id as taken.
    ///
    /// Returns `false` if the id was already known.
    pub fn register(&mut self, id: &StopId) -> bool {
        self.issued.insert(id.clone())
    }

    /// Number of distinct ids issued or registered.
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

impl Default for StopIdGen {
    fn default() -> Self {
        Self::new()
    }
}
