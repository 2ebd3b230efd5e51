pub mod events;
pub mod matches;


pub use events::{EventGroup, EventTeam, EventType, MatchEvent, EVENT_GROUPS};
pub use matches::{Match, Side};

/// Opaque prefixed identifier, unique per call.
pub(crate) fn fresh_id(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_carry_the_prefix_and_never_collide() {
        let a = fresh_id("match");
        let b = fresh_id("match");
        assert!(a.starts_with("match_"));
        assert!(b.starts_with("match_"));
        assert_ne!(a, b);
    }
}
