use crate::domain::Contribution;

/// Ordered query parameters where a later `set` for an existing key replaces the value in
/// place, so layering sources in precedence order never produces duplicate keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn apply(&mut self, contribution: Option<Contribution>) {
        if let Some((key, value)) = contribution {
            self.set(key, value.to_string());
        }
    }

    /// Layer `other` on top of `self`.
    pub fn merge(&mut self, other: Params) {
        for (key, value) in other.0 {
            self.set(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<(String, String)> {
        self.0
    }
}
