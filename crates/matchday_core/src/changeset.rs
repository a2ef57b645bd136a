use std::collections::HashMap;

use crate::Row;

/// One step of a [`Changeset`].
///
/// Indices follow table-view batch update conventions: deletions and move
/// sources refer to the old snapshot, insertions, move targets and updates
/// refer to the new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<R> {
    Delete { index: usize, row: R },
    Insert { index: usize, row: R },
    /// `row` carries the new content, which may differ from the old one.
    Move { from: usize, to: usize, row: R },
    Update { index: usize, row: R },
}

/// The edits turning one ordered snapshot into the next.
///
/// Edits are grouped by kind: deletions, insertions, moves, then updates,
/// each group in ascending index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset<R> {
    old_len: usize,
    new_len: usize,
    edits: Vec<Edit<R>>,
}

impl<R: Row> Changeset<R> {
    pub fn between(old: &[R], new: &[R]) -> Self {
        diff(old, new)
    }

    pub fn edits(&self) -> &[Edit<R>] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn old_len(&self) -> usize {
        self.old_len
    }

    pub fn new_len(&self) -> usize {
        self.new_len
    }

    pub fn deletions(&self) -> Vec<usize> {
        self.edits
            .iter()
            .filter_map(|edit| match edit {
                Edit::Delete { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn insertions(&self) -> Vec<usize> {
        self.edits
            .iter()
            .filter_map(|edit| match edit {
                Edit::Insert { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn moves(&self) -> Vec<(usize, usize)> {
        self.edits
            .iter()
            .filter_map(|edit| match edit {
                Edit::Move { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<usize> {
        self.edits
            .iter()
            .filter_map(|edit| match edit {
                Edit::Update { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    /// Rebuilds the new snapshot from the snapshot this changeset was computed against.
    ///
    /// Rows that were neither deleted nor moved keep their relative order and
    /// fill the slots not claimed by insertions and move targets.
    pub fn apply(&self, old: &[R]) -> Vec<R> {
        let mut removed = vec![false; old.len()];
        let mut placed: Vec<Option<R>> = vec![None; self.new_len];

        for edit in &self.edits {
            match edit {
                Edit::Delete { index, .. } => {
                    if let Some(flag) = removed.get_mut(*index) {
                        *flag = true;
                    }
                }
                Edit::Move { from, to, row } => {
                    if let Some(flag) = removed.get_mut(*from) {
                        *flag = true;
                    }
                    if let Some(slot) = placed.get_mut(*to) {
                        *slot = Some(row.clone());
                    }
                }
                Edit::Insert { index, row } => {
                    if let Some(slot) = placed.get_mut(*index) {
                        *slot = Some(row.clone());
                    }
                }
                Edit::Update { .. } => {}
            }
        }

        let mut kept = old
            .iter()
            .zip(removed)
            .filter(|(_, removed)| !removed)
            .map(|(row, _)| row.clone());

        let mut rows = Vec::with_capacity(self.new_len);
        for slot in placed {
            match slot {
                Some(row) => rows.push(row),
                None => rows.extend(kept.next()),
            }
        }

        for edit in &self.edits {
            if let Edit::Update { index, row } = edit {
                if let Some(target) = rows.get_mut(*index) {
                    *target = row.clone();
                }
            }
        }
        rows
    }
}

/// Computes the changeset from `old` to `new`, matching rows by identity.
///
/// When an identity occurs more than once, only its first occurrence takes
/// part in matching; later occurrences are plain deletions or insertions.
pub fn diff<R: Row>(old: &[R], new: &[R]) -> Changeset<R> {
    let mut first_seen: HashMap<R::Id, usize> = HashMap::with_capacity(old.len());
    for (index, row) in old.iter().enumerate() {
        first_seen.entry(row.id()).or_insert(index);
    }

    // For each old index, the new index it was matched to.
    let mut matched: Vec<Option<usize>> = vec![None; old.len()];
    let mut inserted = Vec::new();
    for (new_index, row) in new.iter().enumerate() {
        match first_seen.remove(&row.id()) {
            Some(old_index) => matched[old_index] = Some(new_index),
            None => inserted.push(new_index),
        }
    }

    let pairs: Vec<(usize, usize)> = matched
        .iter()
        .enumerate()
        .filter_map(|(old_index, target)| target.map(|new_index| (old_index, new_index)))
        .collect();
    let targets: Vec<usize> = pairs.iter().map(|&(_, new_index)| new_index).collect();
    let stable = longest_increasing_subsequence(&targets);

    let mut edits = Vec::new();
    for (old_index, target) in matched.iter().enumerate() {
        if target.is_none() {
            edits.push(Edit::Delete {
                index: old_index,
                row: old[old_index].clone(),
            });
        }
    }
    for new_index in inserted {
        edits.push(Edit::Insert {
            index: new_index,
            row: new[new_index].clone(),
        });
    }

    let mut updates = Vec::new();
    for (&(old_index, new_index), keep) in pairs.iter().zip(&stable) {
        if !keep {
            edits.push(Edit::Move {
                from: old_index,
                to: new_index,
                row: new[new_index].clone(),
            });
        } else if old[old_index] != new[new_index] {
            updates.push(new_index);
        }
    }
    updates.sort_unstable();
    edits.extend(updates.into_iter().map(|index| Edit::Update {
        index,
        row: new[index].clone(),
    }));

    Changeset {
        old_len: old.len(),
        new_len: new.len(),
        edits,
    }
}

/// Marks the members of one longest strictly increasing subsequence of `values`.
fn longest_increasing_subsequence(values: &[usize]) -> Vec<bool> {
    // tails[k] is the position of the smallest tail of an increasing run of length k + 1.
    let mut tails: Vec<usize> = Vec::new();
    let mut previous: Vec<Option<usize>> = vec![None; values.len()];

    for (position, &value) in values.iter().enumerate() {
        let slot = tails.partition_point(|&tail| values[tail] < value);
        if slot > 0 {
            previous[position] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(position);
        } else {
            tails[slot] = position;
        }
    }

    let mut members = vec![false; values.len()];
    let mut cursor = tails.last().copied();
    while let Some(position) = cursor {
        members[position] = true;
        cursor = previous[position];
    }
    members
}

#[cfg(test)]
mod tests {
    use super::longest_increasing_subsequence;

    #[test]
    fn lis_keeps_sorted_input_whole() {
        assert_eq!(longest_increasing_subsequence(&[0, 1, 2]), vec![true; 3]);
    }

    #[test]
    fn lis_drops_the_out_of_order_value() {
        assert_eq!(
            longest_increasing_subsequence(&[0, 3, 1, 2]),
            vec![true, false, true, true]
        );
    }

    #[test]
    fn lis_of_empty_input_is_empty() {
        assert!(longest_increasing_subsequence(&[]).is_empty());
    }
}
