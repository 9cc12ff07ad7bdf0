//! Membership capability shared by every slice filter

/// A decoded slice that can answer membership queries
pub trait MembershipFilter: Send + Sync {
    /// Whether `candidate` (raw hash bytes) may be a member.
    ///
    /// Probabilistic filters never return `false` for a member but may
    /// return `true` for a non-member. Exact filters never do either.
    fn might_contain(&self, candidate: &[u8]) -> bool;
}
