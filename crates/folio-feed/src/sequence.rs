//! Request sequencing.
//!
//! Every refresh and delete takes a ticket from one counter. Only the
//! completion holding the latest ticket may touch the displayed list, so a
//! slow response can never overwrite a newer one.

use std::fmt;

/// Ticket identifying one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Raw sequence number.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic ticket counter.
#[derive(Debug, Default)]
pub(crate) struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    /// Issue a ticket newer than every previous one.
    pub(crate) fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    /// Whether `ticket` is the most recently issued one.
    pub(crate) fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Most recently issued ticket, if any.
    pub(crate) fn latest(&self) -> Option<RequestTicket> {
        (self.latest > 0).then_some(RequestTicket(self.latest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let mut seq = RequestSequence::default();
        assert_eq!(seq.latest(), None);

        let first = seq.issue();
        let second = seq.issue();

        assert!(second > first);
        assert_eq!(seq.latest(), Some(second));
    }

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut seq = RequestSequence::default();
        let first = seq.issue();
        assert!(seq.is_latest(first));

        let second = seq.issue();
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
    }

    #[test]
    fn test_ticket_display() {
        let mut seq = RequestSequence::default();
        assert_eq!(seq.issue().to_string(), "#1");
    }
}
