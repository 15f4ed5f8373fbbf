use log::trace;

use crate::input::Direction;

/// Single-slot store for the direction applied on the next tick.
///
/// Reversal checks compare against the *pending* direction rather than the
/// committed one, so two quick key presses within one tick can never turn
/// the snake back into its own neck.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DirectionBuffer {
    pending: Direction,
}

impl DirectionBuffer {
    #[must_use]
    pub fn new(initial: Direction) -> Self {
        Self { pending: initial }
    }

    /// Stores `direction` unless it reverses the pending direction.
    ///
    /// Requesting the already pending direction leaves it in place.
    /// Rejections are silent.
    pub fn request(&mut self, direction: Direction) {
        if direction == self.pending.opposite() || direction == self.pending {
            trace!(
                "direction request {direction:?} ignored, pending {:?}",
                self.pending
            );
            return;
        }

        self.pending = direction;
    }

    /// Returns the pending direction without consuming it.
    #[must_use]
    pub fn peek(&self) -> Direction {
        self.pending
    }

    /// Overwrites the pending direction unconditionally.
    pub fn reset(&mut self, direction: Direction) {
        self.pending = direction;
    }
}

#[cfg(test)]
mod tests {
    use super::DirectionBuffer;
    use crate::input::Direction;

    #[test]
    fn reversal_of_pending_is_rejected() {
        let mut buffer = DirectionBuffer::new(Direction::Up);

        buffer.request(Direction::Down);
        assert_eq!(buffer.peek(), Direction::Up);

        buffer.request(Direction::Left);
        assert_eq!(buffer.peek(), Direction::Left);
    }

    #[test]
    fn same_direction_is_idempotent() {
        let mut buffer = DirectionBuffer::new(Direction::Right);

        buffer.request(Direction::Right);
        buffer.request(Direction::Right);

        assert_eq!(buffer.peek(), Direction::Right);
    }

    #[test]
    fn two_quick_turns_cannot_reverse() {
        let mut buffer = DirectionBuffer::new(Direction::Up);

        // Left is accepted, after which Right reverses the pending Left.
        buffer.request(Direction::Left);
        buffer.request(Direction::Right);
        assert_eq!(buffer.peek(), Direction::Left);

        // Down is perpendicular to the pending Left, so it is accepted.
        buffer.request(Direction::Down);
        assert_eq!(buffer.peek(), Direction::Down);
    }

    #[test]
    fn last_valid_request_wins() {
        let mut buffer = DirectionBuffer::new(Direction::Up);

        buffer.request(Direction::Left);
        buffer.request(Direction::Up);

        assert_eq!(buffer.peek(), Direction::Up);
    }

    #[test]
    fn reset_bypasses_reversal_rule() {
        let mut buffer = DirectionBuffer::new(Direction::Down);

        buffer.reset(Direction::Up);

        assert_eq!(buffer.peek(), Direction::Up);
    }
}
