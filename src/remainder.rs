//! Remainder grouping: keep the largest categories, fold the rest into "Other".

use crate::distribution::{Distribution, Stat};

/// Key and display name of the synthetic remainder bucket.
pub const OTHER: &str = "Other";

/// Keep the `keep_n` largest categories and collapse the rest into [`OTHER`].
///
/// Entries other than "Other" are ranked by numerator, largest first (ties
/// keep their current order). Everything past the first `keep_n`, together
/// with any existing "Other" entry, is summed into a single "Other" entry
/// appended last. Its value is the sum of its constituents' values, so no
/// rounding drift is introduced beyond what each entry already carries.
/// Ancestor-level values are summed only for levels every constituent has.
///
/// An existing "Other" never takes one of the `keep_n` places, even when it
/// outranks the kept entries, so the result holds up to `keep_n` ranked
/// entries plus "Other". Applying it twice with the same `keep_n` is a
/// no-op the second time.
pub fn group_remainder(distribution: &mut Distribution, keep_n: usize) {
    let existing_other = distribution.remove(OTHER);
    distribution.sort_by_numerator_desc();

    let mut entries = distribution.take_entries();
    let rest = if entries.len() > keep_n {
        entries.split_off(keep_n)
    } else {
        Vec::new()
    };

    let mut constituents = existing_other
        .into_iter()
        .chain(rest.into_iter().map(|(_, s)| s));
    if let Some(first) = constituents.next() {
        let mut other = Stat {
            name: OTHER.to_string(),
            ..first
        };
        for stat in constituents {
            other.values.accumulate(&stat.values);
            other.numerators = match (other.numerators.take(), &stat.numerators) {
                (Some(mut n), Some(m)) => {
                    n.accumulate(m);
                    Some(n)
                }
                _ => None,
            };
        }
        entries.push((OTHER.to_string(), other));
    }

    for (key, stat) in entries {
        distribution.insert(key, stat);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(pairs: &[(&str, f64, f64)]) -> Distribution {
        pairs
            .iter()
            .map(|(k, n, v)| (k.to_string(), Stat::with_numerator(*k, *n, *v)))
            .collect()
    }

    #[test]
    fn nothing_to_group_leaves_distribution_alone() {
        let mut d = dist(&[("a", 3.0, 75.0), ("b", 1.0, 25.0)]);
        let before = d.clone();
        group_remainder(&mut d, 5);
        assert_eq!(d, before);
    }

    #[test]
    fn existing_other_absorbs_remainder() {
        let mut d = dist(&[
            ("a", 5.0, 50.0),
            ("Other", 1.0, 10.0),
            ("b", 3.0, 30.0),
            ("c", 1.0, 10.0),
        ]);
        group_remainder(&mut d, 2);
        assert_eq!(d.keys().collect::<Vec<_>>(), ["a", "b", "Other"]);
        assert_eq!(d.get("Other").unwrap().numerator(), 2.0);
        assert_eq!(d.get("Other").unwrap().this(), Some(20.0));
    }
}
