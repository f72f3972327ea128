//! Collision categories and contact classification
//!
//! The physics engine reports contacts as pairs of bodies tagged with
//! category bitmasks. Only pairs involving the cannonball matter here.

use super::entity::{EntityId, TargetSize};
use super::round::HitEvent;

/// Category bitmasks assigned to physics bodies
pub mod category {
    pub const BLOCKER: u32 = 1;
    pub const TARGET: u32 = 1 << 1;
    pub const CANNONBALL: u32 = 1 << 2;
    pub const WALL: u32 = 1 << 3;

    /// What the cannonball reports contacts with
    pub const CANNONBALL_CONTACTS: u32 = TARGET | BLOCKER | WALL;
}

/// One side of a reported contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactBody {
    pub category_mask: u32,
    /// `None` for bodies without a game entity (scene border, cannonball)
    pub entity: Option<EntityId>,
    /// Set for targets so the bonus can be computed
    pub target_size: Option<TargetSize>,
}

impl ContactBody {
    pub fn is_cannonball(&self) -> bool {
        self.category_mask & category::CANNONBALL != 0
    }
}

/// Turn a raw contact into a hit event.
///
/// Returns `None` when neither body is the cannonball, or when the other
/// body is in no category the round cares about.
pub fn classify_contact(a: &ContactBody, b: &ContactBody) -> Option<HitEvent> {
    let other = if a.is_cannonball() {
        b
    } else if b.is_cannonball() {
        a
    } else {
        return None;
    };

    let mask = other.category_mask;
    if mask & category::TARGET != 0 {
        let (Some(id), Some(size)) = (other.entity, other.target_size) else {
            log::warn!("target contact without entity/size, ignored");
            return None;
        };
        Some(HitEvent::target(id, size))
    } else if mask & category::BLOCKER != 0 {
        let Some(id) = other.entity else {
            log::warn!("blocker contact without entity, ignored");
            return None;
        };
        Some(HitEvent::blocker(id))
    } else if mask & category::WALL != 0 {
        Some(HitEvent::wall())
    } else {
        None
    }
}
