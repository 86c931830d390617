//! Cursor and multi-selection over a listing's entries.
//!
//! [`Selection`] only owns the cursor index. The selected set lives in the
//! entries' own `selected` flags, so the set and the flags can never drift
//! apart and no entry can be a member twice.

use std::path::PathBuf;

use crate::fs::entry::FileEntry;

/// Cursor position plus the operations that grow, shrink, and pin the
/// selection held in a slice of entries.
///
/// Every operation keeps `cursor < entries.len()` (or `0` for an empty
/// slice). Moving past either end clamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    cursor: usize,
}

impl Selection {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Returns the cursor index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Plain cursor motion: drops every non-sticky selection, moves by
    /// `delta` and selects the destination.
    pub fn move_by(&mut self, entries: &mut [FileEntry], delta: isize) {
        if entries.is_empty() {
            self.cursor = 0;
            return;
        }
        clear_unpinned(entries);
        self.cursor = clamp_offset(self.cursor, delta, entries.len());
        select(entries, self.cursor);
    }

    /// Range growth: moves by `delta` keeping the current selection and adds
    /// the destination to it.
    pub fn extend_by(&mut self, entries: &mut [FileEntry], delta: isize) {
        if entries.is_empty() {
            self.cursor = 0;
            return;
        }
        self.cursor = clamp_offset(self.cursor, delta, entries.len());
        select(entries, self.cursor);
    }

    /// Pins the entry under the cursor. Pinned entries survive [`move_by`].
    ///
    /// [`move_by`]: Selection::move_by
    pub fn pin_current(&mut self, entries: &mut [FileEntry]) {
        if let Some(entry) = entries.get_mut(self.cursor) {
            entry.set_sticky(true);
            entry.set_selected(true);
        }
    }

    /// Drops every selection and every pin, then selects the cursor entry.
    pub fn reset(&mut self, entries: &mut [FileEntry]) {
        for entry in entries.iter_mut() {
            entry.set_selected(false);
            entry.set_sticky(false);
        }
        self.clamp(entries.len());
        select(entries, self.cursor);
    }

    /// Moves the cursor to `index` (clamped) as a plain motion would: only
    /// pinned entries stay selected besides the destination.
    pub fn select_only(&mut self, entries: &mut [FileEntry], index: usize) {
        if entries.is_empty() {
            self.cursor = 0;
            return;
        }
        clear_unpinned(entries);
        reapply_sticky(entries);
        self.cursor = index.min(entries.len() - 1);
        select(entries, self.cursor);
    }

    /// Removes every entry from the selection. Pins are kept unless
    /// `include_sticky` is set; kept pins stay unselected until the next
    /// [`reapply_sticky`] or motion.
    pub fn clear(&mut self, entries: &mut [FileEntry], include_sticky: bool) {
        for entry in entries.iter_mut() {
            entry.set_selected(false);
            if include_sticky {
                entry.set_sticky(false);
            }
        }
    }

    /// Brings the cursor back into range after the entries changed and makes
    /// sure the cursor entry and every pinned entry are selected.
    pub fn sync(&mut self, entries: &mut [FileEntry]) {
        self.clamp(entries.len());
        reapply_sticky(entries);
        select(entries, self.cursor);
    }

    fn clamp(&mut self, len: usize) {
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }
}

/// Re-selects every pinned entry.
pub fn reapply_sticky(entries: &mut [FileEntry]) {
    for entry in entries.iter_mut().filter(|e| e.is_sticky()) {
        entry.set_selected(true);
    }
}

/// Indices of the selected entries, in listing order.
pub fn selected_indices(entries: &[FileEntry]) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_selected())
        .map(|(i, _)| i)
        .collect()
}

/// Paths of the selected entries, in listing order.
pub fn selected_paths(entries: &[FileEntry]) -> Vec<PathBuf> {
    entries
        .iter()
        .filter(|e| e.is_selected())
        .map(|e| e.path().to_path_buf())
        .collect()
}

fn clear_unpinned(entries: &mut [FileEntry]) {
    for entry in entries.iter_mut().filter(|e| !e.is_sticky()) {
        entry.set_selected(false);
    }
}

// Selecting an already-selected entry is a no-op: membership is a flag.
fn select(entries: &mut [FileEntry], index: usize) {
    if let Some(entry) = entries.get_mut(index) {
        if !entry.is_selected() {
            entry.set_selected(true);
        }
    }
}

fn clamp_offset(cursor: usize, delta: isize, len: usize) -> usize {
    let last = len.saturating_sub(1);
    if delta.is_negative() {
        cursor.saturating_sub(delta.unsigned_abs())
    } else {
        cursor.saturating_add(delta.unsigned_abs()).min(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entries(names: &[&str]) -> Vec<FileEntry> {
        names
            .iter()
            .map(|n| FileEntry::from_parts(PathBuf::from("/d").join(n), n.to_string(), false, false))
            .collect()
    }

    fn start(names: &[&str]) -> (Selection, Vec<FileEntry>) {
        let mut entries = make_entries(names);
        let mut sel = Selection::new();
        sel.reset(&mut entries);
        (sel, entries)
    }

    #[test]
    fn reset_selects_only_cursor() {
        let (sel, entries) = start(&["a", "b", "c"]);
        assert_eq!(sel.cursor(), 0);
        assert_eq!(selected_indices(&entries), vec![0]);
    }

    #[test]
    fn move_down_moves_single_selection() {
        let (mut sel, mut entries) = start(&["a", "b", "c"]);

        sel.move_by(&mut entries, 1);

        assert_eq!(sel.cursor(), 1);
        assert_eq!(selected_indices(&entries), vec![1]);
    }

    #[test]
    fn move_round_trip_restores_state() {
        for origin in 0..2 {
            let (mut sel, mut entries) = start(&["a", "b", "c"]);
            sel.move_by(&mut entries, origin as isize);
            let before_cursor = sel.cursor();
            let before = selected_indices(&entries);

            sel.move_by(&mut entries, 1);
            sel.move_by(&mut entries, -1);

            assert_eq!(sel.cursor(), before_cursor);
            assert_eq!(selected_indices(&entries), before);
        }
    }

    #[test]
    fn move_clamps_at_both_ends() {
        let (mut sel, mut entries) = start(&["a", "b"]);

        sel.move_by(&mut entries, -1);
        assert_eq!(sel.cursor(), 0);

        sel.move_by(&mut entries, 1);
        sel.move_by(&mut entries, 1);
        assert_eq!(sel.cursor(), 1);
        assert_eq!(selected_indices(&entries), vec![1]);
    }

    #[test]
    fn move_on_empty_is_noop() {
        let mut entries: Vec<FileEntry> = Vec::new();
        let mut sel = Selection::new();

        sel.move_by(&mut entries, 1);
        sel.extend_by(&mut entries, -1);
        sel.pin_current(&mut entries);
        sel.reset(&mut entries);

        assert_eq!(sel.cursor(), 0);
    }

    #[test]
    fn extend_grows_contiguous_range() {
        let (mut sel, mut entries) = start(&["a", "b", "c", "d"]);

        sel.extend_by(&mut entries, 1);
        sel.extend_by(&mut entries, 1);

        assert_eq!(sel.cursor(), 2);
        assert_eq!(selected_indices(&entries), vec![0, 1, 2]);
    }

    #[test]
    fn extend_back_over_selected_does_not_duplicate() {
        let (mut sel, mut entries) = start(&["a", "b", "c"]);

        sel.extend_by(&mut entries, 1);
        sel.extend_by(&mut entries, -1);

        assert_eq!(sel.cursor(), 0);
        assert_eq!(selected_indices(&entries), vec![0, 1]);
    }

    #[test]
    fn plain_move_after_extend_collapses_selection() {
        let (mut sel, mut entries) = start(&["a", "b", "c"]);
        sel.extend_by(&mut entries, 1);

        sel.move_by(&mut entries, 1);

        assert_eq!(selected_indices(&entries), vec![2]);
    }

    #[test]
    fn pinned_entry_survives_moves() {
        let (mut sel, mut entries) = start(&["a", "b", "c", "d"]);
        sel.pin_current(&mut entries);

        for _ in 0..3 {
            sel.move_by(&mut entries, 1);
            assert!(entries[0].is_selected());
        }
        for _ in 0..3 {
            sel.move_by(&mut entries, -1);
            assert!(entries[0].is_selected());
        }
        assert!(entries[0].is_sticky());
        assert_eq!(selected_indices(&entries), vec![0]);
    }

    #[test]
    fn moving_onto_pinned_entry_keeps_single_membership() {
        let (mut sel, mut entries) = start(&["a", "b", "c"]);
        sel.move_by(&mut entries, 1);
        sel.pin_current(&mut entries);
        sel.move_by(&mut entries, 1);

        sel.move_by(&mut entries, -1);

        assert_eq!(sel.cursor(), 1);
        assert_eq!(selected_indices(&entries), vec![1]);
        assert!(entries[1].is_sticky());
    }

    #[test]
    fn reset_clears_pins() {
        let (mut sel, mut entries) = start(&["a", "b", "c"]);
        sel.pin_current(&mut entries);
        sel.move_by(&mut entries, 2);

        sel.reset(&mut entries);

        assert!(entries.iter().all(|e| !e.is_sticky()));
        assert_eq!(selected_indices(&entries), vec![2]);
    }

    #[test]
    fn reset_is_idempotent() {
        let (mut sel, mut entries) = start(&["a", "b", "c"]);
        sel.extend_by(&mut entries, 1);
        sel.pin_current(&mut entries);

        sel.reset(&mut entries);
        let once = (sel, entries.clone());
        sel.reset(&mut entries);

        assert_eq!(sel, once.0);
        assert_eq!(entries, once.1);
    }

    #[test]
    fn clear_keeps_pins_unless_asked() {
        let (mut sel, mut entries) = start(&["a", "b"]);
        sel.pin_current(&mut entries);

        sel.clear(&mut entries, false);
        assert!(selected_indices(&entries).is_empty());
        assert!(entries[0].is_sticky());

        reapply_sticky(&mut entries);
        assert_eq!(selected_indices(&entries), vec![0]);

        sel.clear(&mut entries, true);
        assert!(entries.iter().all(|e| !e.is_sticky() && !e.is_selected()));
    }

    #[test]
    fn select_only_jumps_and_keeps_pins() {
        let (mut sel, mut entries) = start(&["a", "b", "c", "d"]);
        sel.pin_current(&mut entries);
        sel.extend_by(&mut entries, 1);

        sel.select_only(&mut entries, 3);

        assert_eq!(sel.cursor(), 3);
        assert_eq!(selected_indices(&entries), vec![0, 3]);
    }

    #[test]
    fn sync_clamps_after_shrink() {
        let (mut sel, _) = start(&["a", "b", "c"]);
        let mut entries = make_entries(&["a", "b", "c"]);
        sel.move_by(&mut entries, 2);

        let mut shorter = make_entries(&["a"]);
        sel.sync(&mut shorter);

        assert_eq!(sel.cursor(), 0);
        assert_eq!(selected_indices(&shorter), vec![0]);
    }

    #[test]
    fn selected_paths_follow_listing_order() {
        let (mut sel, mut entries) = start(&["a", "b", "c"]);
        sel.move_by(&mut entries, 2);
        sel.extend_by(&mut entries, -1);

        assert_eq!(
            selected_paths(&entries),
            vec![PathBuf::from("/d/b"), PathBuf::from("/d/c")]
        );
    }
}
