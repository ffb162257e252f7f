/*
 * Responsibility
 * - Principal (registered domain\username) and its canonical key
 * - PrincipalRegistry: the static allow-list loaded once at startup
 * - PrincipalStore: the read-only seam the gate looks principals up through
 *
 * Every "domain\username" comparison goes through PrincipalKey::new.
 */
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("authorized principal registry is empty")]
    Empty,
    #[error("malformed principal entry {entry:?} (expected domain\\username)")]
    MalformedEntry { entry: String },
    #[error("invalid principal registry file: {0}")]
    InvalidFile(String),
}

/// Canonical `domain\username` form (both halves lowercased).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PrincipalKey(String);

impl PrincipalKey {
    pub fn new(domain: &str, username: &str) -> Self {
        Self(format!(
            "{}\\{}",
            domain.to_lowercase(),
            username.to_lowercase()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered identity, kept with its declared spelling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Principal {
    pub domain: String,
    pub username: String,
}

impl Principal {
    pub fn new(domain: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            username: username.into(),
        }
    }

    pub fn key(&self) -> PrincipalKey {
        PrincipalKey::new(&self.domain, &self.username)
    }

    fn validate(self) -> Result<Self, RegistryError> {
        let domain = self.domain.trim();
        let username = self.username.trim();
        if domain.is_empty()
            || username.is_empty()
            || domain.contains('\\')
            || username.contains('\\')
        {
            return Err(RegistryError::MalformedEntry {
                entry: format!("{}\\{}", self.domain, self.username),
            });
        }
        Ok(Self::new(domain, username))
    }
}

impl FromStr for Principal {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (domain, username) = s
            .trim()
            .split_once('\\')
            .ok_or_else(|| RegistryError::MalformedEntry {
                entry: s.trim().to_string(),
            })?;
        Principal::new(domain, username).validate()
    }
}

/// Read-only principal lookup used by the authorization gate.
pub trait PrincipalStore: Send + Sync {
    /// Principal whose canonical key equals `key`, if any.
    fn find(&self, key: &PrincipalKey) -> Option<&Principal>;

    /// Canonical keys of every registered principal, in registration order.
    fn keys(&self) -> Vec<PrincipalKey>;
}

#[derive(Debug, Clone, Default)]
pub struct PrincipalRegistry {
    entries: Vec<(PrincipalKey, Principal)>,
}

impl PrincipalRegistry {
    /// Builds a registry, collapsing duplicate keys (the later declaration wins
    /// but keeps the earlier position). An empty result is an error.
    pub fn from_principals(
        principals: impl IntoIterator<Item = Principal>,
    ) -> Result<Self, RegistryError> {
        let mut entries: Vec<(PrincipalKey, Principal)> = Vec::new();
        for principal in principals {
            let principal = principal.validate()?;
            let key = principal.key();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = principal,
                None => entries.push((key, principal)),
            }
        }

        let registry = Self { entries };
        if registry.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(registry)
    }

    /// Parses a comma or newline separated list of `domain\username` entries.
    pub fn parse_list(list: &str) -> Result<Self, RegistryError> {
        let principals = list
            .split([',', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Principal::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_principals(principals)
    }

    /// Parses a JSON array of `{"domain": .., "username": ..}` objects.
    pub fn parse_json(json: &str) -> Result<Self, RegistryError> {
        let principals: Vec<Principal> =
            serde_json::from_str(json).map_err(|e| RegistryError::InvalidFile(e.to_string()))?;
        Self::from_principals(principals)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn principals(&self) -> impl Iterator<Item = &Principal> {
        self.entries.iter().map(|(_, p)| p)
    }
}

impl PrincipalStore for PrincipalRegistry {
    fn find(&self, key: &PrincipalKey) -> Option<&Principal> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, p)| p)
    }

    fn keys(&self) -> Vec<PrincipalKey> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }
}
