//! Namespaced profile entries attached to a site.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Pegasus,
    Condor,
    Dagman,
    Globus,
    Env,
}

impl Namespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Pegasus => "pegasus",
            Namespace::Condor => "condor",
            Namespace::Dagman => "dagman",
            Namespace::Globus => "globus",
            Namespace::Env => "env",
        }
    }
}

/// A profile value as written in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileValue {
    Flag(bool),
    Integer(i64),
    Text(String),
}

impl ProfileValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, ProfileValue::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for ProfileValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileValue::Flag(flag) => write!(f, "{}", flag),
            ProfileValue::Integer(value) => write!(f, "{}", value),
            ProfileValue::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<bool> for ProfileValue {
    fn from(value: bool) -> Self {
        ProfileValue::Flag(value)
    }
}

impl From<i64> for ProfileValue {
    fn from(value: i64) -> Self {
        ProfileValue::Integer(value)
    }
}

impl From<i32> for ProfileValue {
    fn from(value: i32) -> Self {
        ProfileValue::Integer(i64::from(value))
    }
}

impl From<&str> for ProfileValue {
    fn from(value: &str) -> Self {
        ProfileValue::Text(value.to_string())
    }
}

impl From<String> for ProfileValue {
    fn from(value: String) -> Self {
        ProfileValue::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEntry {
    pub namespace: Namespace,
    pub key: String,
    pub value: ProfileValue,
}

/// Ordered profile entries, kept grouped by namespace.
///
/// Setting an existing (namespace, key) replaces the value in place. Empty text values
/// are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profiles {
    entries: Vec<ProfileEntry>,
}

impl Profiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        namespace: Namespace,
        key: impl Into<String>,
        value: impl Into<ProfileValue>,
    ) -> Self {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            return self;
        }

        if let Some(existing) =
            self.entries.iter_mut().find(|entry| entry.namespace == namespace && entry.key == key)
        {
            existing.value = value;
            return self;
        }

        let entry = ProfileEntry { namespace, key, value };
        match self.entries.iter().rposition(|entry| entry.namespace == namespace) {
            Some(last) => self.entries.insert(last + 1, entry),
            None => self.entries.push(entry),
        }
        self
    }

    /// Set `key` only when a value is present.
    pub fn with_opt<V: Into<ProfileValue>>(
        self,
        namespace: Namespace,
        key: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        match value {
            Some(value) => self.with(namespace, key, value),
            None => self,
        }
    }

    pub fn pegasus(self, key: &str, value: impl Into<ProfileValue>) -> Self {
        self.with(Namespace::Pegasus, key, value)
    }

    pub fn condor(self, key: &str, value: impl Into<ProfileValue>) -> Self {
        self.with(Namespace::Condor, key, value)
    }

    pub fn env(self, key: &str, value: impl Into<ProfileValue>) -> Self {
        self.with(Namespace::Env, key, value)
    }

    /// Apply every entry of `other` on top of `self`.
    pub fn merge(self, other: Profiles) -> Self {
        other
            .entries
            .into_iter()
            .fold(self, |acc, entry| acc.with(entry.namespace, entry.key, entry.value))
    }

    pub fn get(&self, namespace: Namespace, key: &str) -> Option<&ProfileValue> {
        self.entries
            .iter()
            .find(|entry| entry.namespace == namespace && entry.key == key)
            .map(|entry| &entry.value)
    }

    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Namespaces in first-seen order.
    pub fn namespaces(&self) -> Vec<Namespace> {
        let mut seen: Vec<Namespace> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.namespace) {
                seen.push(entry.namespace);
            }
        }
        seen
    }
}
