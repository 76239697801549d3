use anyhow::Result;
use std::collections::HashMap;
use crate::data::X;

/// Ordered collection of tensors, optionally addressable by name.
#[derive(Debug, Clone, Default)]
pub struct Xs {
    map: HashMap<String, usize>,
    xs: Vec<X>,
}

impl From<X> for Xs {
    fn from(x: X) -> Self {
        Self::from(vec![x])
    }
}

impl From<Vec<X>> for Xs {
    fn from(xs: Vec<X>) -> Self {
        Self { map: HashMap::new(), xs }
    }
}

impl IntoIterator for Xs {
    type Item = X;
    type IntoIter = std::vec::IntoIter<X>;

    fn into_iter(self) -> Self::IntoIter {
        self.xs.into_iter()
    }
}

impl Xs {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push_kv(&mut self, key: &str, x: X) -> Result<()> {
        if self.map.contains_key(key) {
            anyhow::bail!("Duplicate tensor name: {}", key);
        }
        self.map.insert(key.to_string(), self.xs.len());
        self.xs.push(x);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&X> {
        self.map.get(key).and_then(|&i| self.xs.get(i))
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, X> {
        self.xs.iter()
    }
}
