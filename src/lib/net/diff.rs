// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::JsonDisplay;

/// Name based difference between two versions of a collection.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct CollectionDiff {
    /// Names only found in the new collection.
    pub added: Vec<String>,
    /// Names only found in the old collection.
    pub removed: Vec<String>,
    /// Names found in both but holding different content.
    pub changed: Vec<String>,
}

impl CollectionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.changed.is_empty()
    }

    pub(crate) fn compute<'a, T, F>(
        new: impl Iterator<Item = (&'a str, &'a T)> + Clone,
        old: impl Iterator<Item = (&'a str, &'a T)> + Clone,
        is_same: F,
    ) -> Self
    where
        T: 'a,
        F: Fn(&T, &T) -> bool,
    {
        let mut ret = Self::default();
        for (name, new_item) in new.clone() {
            match old.clone().find(|(n, _)| *n == name) {
                Some((_, old_item)) => {
                    if !is_same(new_item, old_item) {
                        ret.changed.push(name.to_string());
                    }
                }
                None => ret.added.push(name.to_string()),
            }
        }
        for (name, _) in old {
            if !new.clone().any(|(n, _)| n == name) {
                ret.removed.push(name.to_string());
            }
        }
        ret
    }
}
