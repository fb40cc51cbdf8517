use crate::error::{Error, Result};

/// A position over a sequence of fixed length.
///
/// `position` is either a valid index or `None`, the "nothing selected"
/// sentinel. It never goes out of bounds and never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: Option<usize>,
    len: usize,
}

impl Cursor {
    /// A cursor on the first item (or unselected if `len` is 0).
    pub fn new(len: usize) -> Self {
        Self {
            position: if len > 0 { Some(0) } else { None },
            len,
        }
    }

    /// A cursor that starts with nothing selected.
    pub fn unselected(len: usize) -> Self {
        Self {
            position: None,
            len,
        }
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_last(&self) -> bool {
        matches!(self.position, Some(p) if p + 1 == self.len)
    }

    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.position = Some(index);
        Ok(())
    }

    /// Moves one step forward. Returns `false` (and stays put) at the end or
    /// when nothing is selected.
    pub fn next(&mut self) -> bool {
        match self.position {
            Some(p) if p + 1 < self.len => {
                self.position = Some(p + 1);
                true
            }
            _ => false,
        }
    }

    /// Moves one step back. Returns `false` (and stays put) at the start or
    /// when nothing is selected.
    pub fn prev(&mut self) -> bool {
        match self.position {
            Some(p) if p > 0 => {
                self.position = Some(p - 1);
                true
            }
            _ => false,
        }
    }

    /// Back to the first item over a sequence of `len` items.
    pub fn reset(&mut self, len: usize) {
        *self = Self::new(len);
    }

    /// Back to "nothing selected" over a sequence of `len` items.
    pub fn reset_unselected(&mut self, len: usize) {
        *self = Self::unselected(len);
    }

    pub fn clear(&mut self) {
        self.position = None;
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.position, Some(p) if p > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.position, Some(p) if p + 1 < self.len)
    }

    /// "3 / 10" style counter; empty when nothing is selected.
    pub fn label(&self) -> String {
        match self.position {
            Some(p) => format!("{} / {}", p + 1, self.len),
            None => String::new(),
        }
    }

    /// Share of the sequence reached so far, in whole percent.
    pub fn progress_percent(&self) -> u8 {
        match self.position {
            Some(p) => (((p + 1) * 200 + self.len) / (2 * self.len)) as u8,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_item() {
        let cursor = Cursor::new(4);
        assert_eq!(cursor.position(), Some(0));
        assert!(!cursor.can_go_back());
        assert!(cursor.can_go_forward());
        assert_eq!(cursor.label(), "1 / 4");
    }

    #[test]
    fn empty_cursor_has_no_position() {
        let mut cursor = Cursor::new(0);
        assert_eq!(cursor.position(), None);
        assert!(!cursor.next());
        assert!(!cursor.prev());
        assert!(matches!(cursor.jump_to(0), Err(Error::OutOfRange { index: 0, len: 0 })));
    }

    #[test]
    fn next_and_prev_clamp_at_the_edges() {
        let mut cursor = Cursor::new(3);
        assert!(!cursor.prev());
        assert!(cursor.next());
        assert!(cursor.next());
        assert!(!cursor.next());
        assert_eq!(cursor.position(), Some(2));
        assert!(cursor.is_last());
        assert!(!cursor.can_go_forward());
        assert!(cursor.can_go_back());
    }

    #[test]
    fn jump_out_of_range_leaves_position() {
        let mut cursor = Cursor::new(3);
        cursor.jump_to(1).unwrap();
        assert!(cursor.jump_to(3).is_err());
        assert_eq!(cursor.position(), Some(1));
    }

    #[test]
    fn unselected_cursor_does_not_step() {
        let mut cursor = Cursor::unselected(5);
        assert!(!cursor.next());
        assert!(!cursor.prev());
        assert_eq!(cursor.label(), "");
        cursor.jump_to(4).unwrap();
        assert_eq!(cursor.position(), Some(4));
        cursor.clear();
        assert_eq!(cursor.position(), None);
    }

    #[test]
    fn reset_replaces_length() {
        let mut cursor = Cursor::new(3);
        cursor.jump_to(2).unwrap();
        cursor.reset(7);
        assert_eq!(cursor.position(), Some(0));
        assert_eq!(cursor.len(), 7);
        cursor.reset_unselected(2);
        assert_eq!(cursor.position(), None);
        assert_eq!(cursor.len(), 2);
    }

    #[test]
    fn progress_rounds_to_whole_percent() {
        let mut cursor = Cursor::new(3);
        assert_eq!(cursor.progress_percent(), 33);
        cursor.next();
        assert_eq!(cursor.progress_percent(), 67);
        cursor.next();
        assert_eq!(cursor.progress_percent(), 100);
    }
}
