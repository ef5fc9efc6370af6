//! Folder record deduplication.
//!
//! Several CurseForge files of one project often ship the same set of folders
//! for different client lines. They collapse into a single record whose
//! compatibility is the union of theirs.

use crate::types::{AddonDefinition, FolderRecord};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Merge identity: the folder list is compared as a set
type FolderKey = (AddonDefinition, BTreeSet<String>);

/// Insert-or-union table over folder records, remembering first-seen order
#[derive(Debug, Default)]
pub struct FolderTable {
    index: HashMap<FolderKey, usize>,
    records: Vec<FolderRecord>,
}

impl FolderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `record` opened a new group.
    ///
    /// A record joining an existing group only contributes its compatibility;
    /// the group keeps the folder order of its first member.
    pub fn insert_or_union(&mut self, record: FolderRecord) -> bool {
        let key = (
            record.definition.clone(),
            record.folders.iter().cloned().collect::<BTreeSet<_>>(),
        );
        match self.index.get(&key) {
            Some(&position) => {
                self.records[position]
                    .compatibility
                    .union_with(&record.compatibility);
                false
            }
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Merged records in first-encountered group order
    pub fn into_records(self) -> Vec<FolderRecord> {
        self.records
    }
}

impl Extend<FolderRecord> for FolderTable {
    fn extend<I: IntoIterator<Item = FolderRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert_or_union(record);
        }
    }
}

pub fn merge_folders<I>(records: I) -> Vec<FolderRecord>
where
    I: IntoIterator<Item = FolderRecord>,
{
    let mut table = FolderTable::new();
    let mut seen = 0usize;
    table.extend(records.into_iter().inspect(|_| seen += 1));
    debug!("Merged {} folder records into {}", seen, table.len());
    table.into_records()
}
