//! The outbound FIFO.

use std::collections::VecDeque;

use deskbot_protocol::OutboundMessage;

/// Messages waiting to be written, oldest first.
///
/// The transport only ever writes the front entry and pops it once the
/// write has completed, so a message is never dropped half-sent and never
/// overtaken by a later one.
#[derive(Debug, Default)]
pub struct SendQueue {
    pending: VecDeque<OutboundMessage>,
}

impl SendQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the back of the queue.
    pub fn push(&mut self, msg: OutboundMessage) {
        self.pending.push_back(msg);
    }

    /// The next message to transmit.
    pub fn front(&self) -> Option<&OutboundMessage> {
        self.pending.front()
    }

    /// Removes the message whose write just completed.
    pub fn pop(&mut self) -> Option<OutboundMessage> {
        self.pending.pop_front()
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskbot_protocol::ctos::{Rematch, RpsChoice};

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = SendQueue::new();
        queue.push(OutboundMessage::fixed(&RpsChoice { value: 1 }));
        queue.push(OutboundMessage::fixed(&Rematch { value: 1 }));
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.front().map(|m| m.type_id()), Some(0x03));
        assert_eq!(queue.pop().map(|m| m.type_id()), Some(0x03));
        assert_eq!(queue.pop().map(|m| m.type_id()), Some(0xF0));
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }
}
