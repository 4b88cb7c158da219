/// Ordered ring of focus candidates with a cursor that wraps at both ends.
#[derive(Debug, Clone)]
pub struct FocusRing<T: Copy + Eq> {
    order: Vec<T>,
    current: Option<T>,
}

impl<T: Copy + Eq> FocusRing<T> {
    pub fn new(order: Vec<T>, current: Option<T>) -> Self {
        Self { order, current }
    }

    /// Move the cursor one step and return the new current entry.
    ///
    /// When the cursor is not part of the ring, moving forward lands on the
    /// first entry and moving backward on the last one.
    pub fn advance(&mut self, forward: bool) -> Option<T> {
        if self.order.is_empty() {
            return None;
        }
        let len = self.order.len() as isize;
        let next = match self
            .current
            .and_then(|current| self.order.iter().position(|entry| *entry == current))
        {
            Some(idx) => {
                let step = if forward { 1isize } else { -1isize };
                (idx as isize + step).rem_euclid(len) as usize
            }
            None if forward => 0,
            None => (len - 1) as usize,
        };
        self.current = Some(self.order[next]);
        self.current
    }
}
