//! Sections: the typed tree a topic builder produces for one geography.

use crate::distribution::{Distribution, Stat};
use serde::{Serialize, Serializer};
use serde::ser::SerializeMap;

/// A value stored under a section key.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionItem {
    Stat(Stat),
    Distribution(Distribution),
    /// A nested group of items, e.g. "head_of_household".
    Group(Section),
}

impl From<Stat> for SectionItem {
    fn from(s: Stat) -> Self {
        SectionItem::Stat(s)
    }
}

impl From<Distribution> for SectionItem {
    fn from(d: Distribution) -> Self {
        SectionItem::Distribution(d)
    }
}

impl From<Section> for SectionItem {
    fn from(s: Section) -> Self {
        SectionItem::Group(s)
    }
}

impl Serialize for SectionItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SectionItem::Stat(s) => s.serialize(serializer),
            SectionItem::Distribution(d) => d.serialize(serializer),
            SectionItem::Group(g) => g.serialize(serializer),
        }
    }
}

/// Ordered mapping from topic-specific key to [`SectionItem`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    items: Vec<(String, SectionItem)>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, item: impl Into<SectionItem>) -> Self {
        self.insert(key, item);
        self
    }

    /// Insert or replace; a replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, item: impl Into<SectionItem>) {
        let key = key.into();
        let item = item.into();
        match self.items.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = item,
            None => self.items.push((key, item)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SectionItem> {
        self.items.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut SectionItem> {
        self.items
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn stat(&self, key: &str) -> Option<&Stat> {
        match self.get(key)? {
            SectionItem::Stat(s) => Some(s),
            _ => None,
        }
    }

    pub fn distribution(&self, key: &str) -> Option<&Distribution> {
        match self.get(key)? {
            SectionItem::Distribution(d) => Some(d),
            _ => None,
        }
    }

    pub fn distribution_mut(&mut self, key: &str) -> Option<&mut Distribution> {
        match self.get_mut(key)? {
            SectionItem::Distribution(d) => Some(d),
            _ => None,
        }
    }

    pub fn group(&self, key: &str) -> Option<&Section> {
        match self.get(key)? {
            SectionItem::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionItem)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut SectionItem)> {
        self.items.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every stat in the tree with its key path, depth first.
    pub fn walk(&self) -> Vec<(Vec<&str>, &Stat)> {
        let mut out = Vec::new();
        walk_into(self, &mut Vec::new(), &mut out);
        out
    }
}

fn walk_into<'a>(
    section: &'a Section,
    path: &mut Vec<&'a str>,
    out: &mut Vec<(Vec<&'a str>, &'a Stat)>,
) {
    for (key, item) in section.iter() {
        path.push(key);
        match item {
            SectionItem::Stat(s) => out.push((path.clone(), s)),
            SectionItem::Distribution(d) => {
                for (k, s) in d.iter() {
                    path.push(k);
                    out.push((path.clone(), s));
                    path.pop();
                }
            }
            SectionItem::Group(g) => walk_into(g, path, out),
        }
        path.pop();
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (k, v) in &self.items {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
