//! Ordered move log with a review cursor.
//!
//! Entries before the cursor are on the board; entries at or after it have
//! been stepped back over in review mode and are kept for replay. Pushing and
//! popping work at the cursor, so simulating moves in a reviewed position
//! leaves the reviewed tail intact.

use crate::game_state::move_record::Move;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<Move>,
    cursor: usize,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True while some recorded moves have been stepped back over.
    #[inline]
    pub fn is_reviewing(&self) -> bool {
        self.cursor < self.moves.len()
    }

    /// Most recent move currently reflected on the board.
    pub fn last(&self) -> Option<&Move> {
        self.applied().last()
    }

    pub fn applied(&self) -> &[Move] {
        &self.moves[..self.cursor]
    }

    pub fn all(&self) -> &[Move] {
        &self.moves
    }

    /// Inserts `mv` at the cursor and steps past it.
    pub(crate) fn push(&mut self, mv: Move) {
        self.moves.insert(self.cursor, mv);
        self.cursor += 1;
    }

    /// Removes the entry just before the cursor.
    pub(crate) fn pop(&mut self) -> Option<Move> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.moves.remove(self.cursor))
    }

    /// Moves the cursor back one entry and returns the move to revert.
    pub(crate) fn step_back(&mut self) -> Option<&Move> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.moves.get(self.cursor)
    }

    /// Moves the cursor forward one entry and returns the move to replay.
    pub(crate) fn step_forward(&mut self) -> Option<&Move> {
        let mv = self.moves.get(self.cursor)?;
        self.cursor += 1;
        Some(mv)
    }
}
