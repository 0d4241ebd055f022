//! Interaction state: sort key, sort order and column-set variant.
//!
//! Single characters map to [`Command`]s; [`DisplayState::apply`] performs the
//! transition and [`DisplayState::reconcile`] feeds back the columns the last
//! frame actually rendered.

use crate::column::{Column, ColumnSet};

/// Sort direction chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub const fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Header marker for the active sort column.
    pub const fn marker(self) -> char {
        match self {
            Self::Ascending => '^',
            Self::Descending => 'v',
        }
    }
}

/// A keyboard command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `s`: next sortable key, wrapping.
    NextSortKey,
    /// `S`: previous sortable key, wrapping.
    PrevSortKey,
    /// `r` / `R`: flip the sort order.
    ReverseOrder,
    /// `c`: cycle the column-set variant.
    CycleColumns,
}

impl Command {
    /// Map a typed character; anything unbound is `None`.
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            's' => Some(Self::NextSortKey),
            'S' => Some(Self::PrevSortKey),
            'r' | 'R' => Some(Self::ReverseOrder),
            'c' => Some(Self::CycleColumns),
            _ => None,
        }
    }
}

/// The dashboard's interaction state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub sort_key: Column,
    pub sort_order: SortOrder,
    pub column_set: ColumnSet,
    /// Keys the user can cycle through, as reported by the last frame.
    sortable: Vec<Column>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            sort_key: Column::DEFAULT_SORT,
            sort_order: SortOrder::Ascending,
            column_set: ColumnSet::Base,
            sortable: Column::INITIAL_SORTABLE.to_vec(),
        }
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sortable(&self) -> &[Column] {
        &self.sortable
    }

    /// Apply one command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::NextSortKey => self.step_sort_key(true),
            Command::PrevSortKey => self.step_sort_key(false),
            Command::ReverseOrder => self.sort_order = self.sort_order.flip(),
            Command::CycleColumns => self.column_set = self.column_set.next(),
        }
    }

    /// Apply a raw input character, if it is bound.
    pub fn handle_char(&mut self, ch: char) {
        if let Some(command) = Command::from_char(ch) {
            self.apply(command);
        }
    }

    /// A key outside the sequence steps onto its first (or last) entry.
    fn step_sort_key(&mut self, forward: bool) {
        let len = self.sortable.len();
        if len == 0 {
            self.sort_key = Column::DEFAULT_SORT;
            return;
        }
        let Some(idx) = self.sortable.iter().position(|&c| c == self.sort_key) else {
            self.sort_key = if forward {
                self.sortable[0]
            } else {
                self.sortable[len - 1]
            };
            return;
        };
        let next = if forward {
            (idx + 1) % len
        } else if idx == 0 {
            len - 1
        } else {
            idx - 1
        };
        self.sort_key = self.sortable[next];
    }

    /// Record the columns the last frame rendered and repair the sort key.
    ///
    /// An empty frame reports no columns, which also resets the key.
    pub fn reconcile(&mut self, selected: Vec<Column>) {
        if !selected.contains(&self.sort_key) {
            self.sort_key = Column::DEFAULT_SORT;
        }
        self.sortable = selected;
    }
}
