//! Note stack: the held notes in priority order.
//!
//! Fixed storage for all 128 MIDI keys plus a key → position index, so note-off
//! lookup is O(1) and nothing allocates after construction. Removal only marks
//! an entry inactive; [`NoteStack::compact`] sweeps inactive entries once all
//! releases for a time point have been applied.
//!
//! The last entry is the sounding note. The entry below it is the slide base.

use tracing::warn;

/// Maximum number of simultaneously held notes (one per MIDI key).
pub const STACK_CAPACITY: usize = 128;

/// One tracked note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoteEntry {
    pub key: u8,
    pub velocity: u8,
    /// False once released; the slot is reclaimed by `compact()`.
    pub active: bool,
}

/// Outcome of a stack mutation. Failures leave the stack unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackResult {
    Added,
    Removed,
    Full,
    Duplicate,
    NotFound,
    InvalidKey,
}

#[derive(Debug, Clone)]
pub struct NoteStack {
    entries: [NoteEntry; STACK_CAPACITY],
    len: usize,
    /// Position of each key's most recent entry; valid only below `len`
    key_to_index: [u8; 128],
}

impl NoteStack {
    pub fn new() -> Self {
        Self {
            entries: [NoteEntry::default(); STACK_CAPACITY],
            len: 0,
            key_to_index: [0; 128],
        }
    }

    /// Push a new active entry on top.
    pub fn add(&mut self, key: u8, velocity: u8) -> StackResult {
        if key > 127 {
            warn!(key, "Note key out of range");
            return StackResult::InvalidKey;
        }
        if self.len >= STACK_CAPACITY {
            warn!(key, "Note stack is full, dropping note");
            return StackResult::Full;
        }
        if self.position_of(key).is_some() {
            warn!(key, "Note is already in stack");
            return StackResult::Duplicate;
        }

        self.entries[self.len] = NoteEntry {
            key,
            velocity,
            active: true,
        };
        self.key_to_index[key as usize] = self.len as u8;
        self.len += 1;
        StackResult::Added
    }

    /// Mark `key` released. The entry stays in place until `compact()`.
    pub fn remove(&mut self, key: u8) -> StackResult {
        if key > 127 {
            warn!(key, "Note key out of range");
            return StackResult::InvalidKey;
        }
        match self.position_of(key) {
            Some(index) => {
                self.entries[index].active = false;
                StackResult::Removed
            }
            None => {
                warn!(key, "Note is not in stack");
                StackResult::NotFound
            }
        }
    }

    /// Drop every entry. Stale index values all point past `len`.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Remove inactive entries, keeping the order of the survivors.
    ///
    /// Returns how many entries were removed.
    pub fn compact(&mut self) -> usize {
        let mut write = 0;
        for read in 0..self.len {
            let entry = self.entries[read];
            if !entry.active {
                continue;
            }
            if write != read {
                self.entries[write] = entry;
                self.key_to_index[entry.key as usize] = write as u8;
            }
            write += 1;
        }
        let removed = self.len - write;
        self.len = write;
        removed
    }

    /// Of the entries added at or above `start_at`, move the one with the
    /// lowest velocity to the top by swapping it with the current top.
    ///
    /// Scans from the top down with a strict comparison, so among equal
    /// velocities the entry nearest the top wins. No-op unless at least two
    /// entries sit at or above `start_at`.
    pub fn move_primary_to_top(&mut self, start_at: usize) {
        if self.len < 2 || start_at + 2 > self.len {
            return;
        }

        let top = self.len - 1;
        let mut min_index = top;
        let mut min_velocity = self.entries[top].velocity;
        for index in (start_at..top).rev() {
            let velocity = self.entries[index].velocity;
            if velocity < min_velocity {
                min_velocity = velocity;
                min_index = index;
            }
        }

        if min_index != top {
            self.entries.swap(min_index, top);
            self.key_to_index[self.entries[top].key as usize] = top as u8;
            self.key_to_index[self.entries[min_index].key as usize] = min_index as u8;
        }
    }

    /// Index of the active entry for `key`.
    #[inline]
    pub fn position_of(&self, key: u8) -> Option<usize> {
        let index = *self.key_to_index.get(key as usize)? as usize;
        let entry = self.entries[..self.len].get(index)?;
        (entry.key == key && entry.active).then_some(index)
    }

    #[inline]
    pub fn contains(&self, key: u8) -> bool {
        self.position_of(key).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&NoteEntry> {
        self.entries[..self.len].get(index)
    }

    /// The sounding note.
    #[inline]
    pub fn top(&self) -> Option<&NoteEntry> {
        self.len.checked_sub(1).map(|index| &self.entries[index])
    }

    /// The note below the top, which a slide starts from.
    #[inline]
    pub fn slide_base(&self) -> Option<&NoteEntry> {
        self.len.checked_sub(2).map(|index| &self.entries[index])
    }

    /// `(base_key, top_key)` of the current slide, if two notes are held.
    #[inline]
    pub fn slide_pair(&self) -> Option<(u8, u8)> {
        Some((self.slide_base()?.key, self.top()?.key))
    }

    #[inline]
    pub fn as_slice(&self) -> &[NoteEntry] {
        &self.entries[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteEntry> {
        self.as_slice().iter()
    }
}

impl Default for NoteStack {
    fn default() -> Self {
        Self::new()
    }
}
