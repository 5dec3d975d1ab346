//! Cross-level merging: copy ancestor-level values into a geography's section.
//!
//! Traversal follows the typed tree (section key, optional distribution key,
//! then the stat's `values`/`numerators`), so two leaves only meet when their
//! key paths are identical. Distribution metadata is not part of the tree and
//! is never visited.

use crate::distribution::Stat;
use crate::models::GeoLevel;
use crate::section::{Section, SectionItem};
use crate::stats::index_ratio;

/// Callback invoked for every stat reachable in a section.
pub trait StatVisitor {
    fn visit(&mut self, path: &[&str], stat: &mut Stat);
}

/// Visit every stat in `section`, depth first, in key order.
pub fn visit_stats<V: StatVisitor>(section: &mut Section, visitor: &mut V) {
    let mut path = Vec::new();
    visit_into(section, &mut path, visitor);
}

fn visit_into<'a, V: StatVisitor>(
    section: &'a mut Section,
    path: &mut Vec<&'a str>,
    visitor: &mut V,
) {
    for (key, item) in section.iter_mut() {
        path.push(key);
        match item {
            SectionItem::Stat(stat) => visitor.visit(path, stat),
            SectionItem::Distribution(dist) => {
                for (k, stat) in dist.iter_mut() {
                    path.push(k);
                    visitor.visit(path, stat);
                    path.pop();
                }
            }
            SectionItem::Group(group) => visit_into(group, path, visitor),
        }
        path.pop();
    }
}

/// Resolve a key path produced by [`visit_stats`] against another section.
pub fn lookup<'a>(section: &'a Section, path: &[&str]) -> Option<&'a Stat> {
    let (head, rest) = path.split_first()?;
    match (section.get(head)?, rest) {
        (SectionItem::Stat(stat), []) => Some(stat),
        (SectionItem::Distribution(dist), [key]) => dist.get(key),
        (SectionItem::Group(group), rest) if !rest.is_empty() => lookup(group, rest),
        _ => None,
    }
}

struct LevelMerger<'p> {
    parent: &'p Section,
    level: GeoLevel,
    merged: usize,
}

impl StatVisitor for LevelMerger<'_> {
    fn visit(&mut self, path: &[&str], stat: &mut Stat) {
        let Some(parent) = lookup(self.parent, path) else {
            return;
        };
        if let Some(v) = parent.values.this {
            stat.values.set(self.level, v);
            self.merged += 1;
        }
        let parent_numerator = parent.numerators.as_ref().and_then(|n| n.this);
        if let (Some(n), Some(v)) = (stat.numerators.as_mut(), parent_numerator) {
            n.set(self.level, v);
        }
    }
}

/// Merge `parent`'s values into `child` under `level`.
///
/// For every stat in `child` whose key path also exists in `parent`, the
/// parent's `this` value is stored as `values[level]` (and likewise for
/// numerators). Keys missing from the parent are left untouched; parent data
/// is often sparser than the child's. Returns the number of merged values.
pub fn merge_section(child: &mut Section, parent: &Section, level: GeoLevel) -> usize {
    let mut merger = LevelMerger {
        parent,
        level,
        merged: 0,
    };
    visit_stats(child, &mut merger);
    merger.merged
}

struct ParentIndexer;

impl StatVisitor for ParentIndexer {
    fn visit(&mut self, _path: &[&str], stat: &mut Stat) {
        let Some(this) = stat.values.this else {
            return;
        };
        let levels: Vec<GeoLevel> = stat.values.levels().collect();
        for level in levels {
            let parent = stat.values.get(level).unwrap_or_default();
            if let Some(index) = index_ratio(this, parent) {
                stat.values.set_index(level, index);
            }
        }
    }
}

/// Add `<level>_index` next to every merged ancestor value: the target's
/// value relative to that level's, see [`index_ratio`].
pub fn add_parent_indices(section: &mut Section) {
    visit_stats(section, &mut ParentIndexer);
}
