//! Request approval transitions.
//!
//! Every status can be reached from every other one by an admin edit. What a
//! transition does to the calendar only depends on whether the request is
//! approved before and after the edit:
//!
//! | before    | after     | effect                                  |
//! |-----------|-----------|-----------------------------------------|
//! | not appr. | approved  | materialize a new slot                  |
//! | approved  | approved  | reschedule the linked slot if times or room moved |
//! | approved  | not appr. | retract the linked slot                 |
//! | not appr. | not appr. | nothing                                 |

use uuid::Uuid;

use crate::models::request::SlotRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotEffect {
    Unchanged,
    Materialize,
    Reschedule { slot_id: Uuid },
    Retract { slot_id: Uuid },
}

pub fn plan_transition(before: &SlotRequest, after: &SlotRequest) -> SlotEffect {
    match (before.is_approved(), after.is_approved(), before.slot_id) {
        (false, true, _) => SlotEffect::Materialize,
        // An approved request that lost its slot gets a fresh one.
        (true, true, None) => SlotEffect::Materialize,
        (true, true, Some(slot_id)) if moved(before, after) => SlotEffect::Reschedule { slot_id },
        (true, false, Some(slot_id)) => SlotEffect::Retract { slot_id },
        _ => SlotEffect::Unchanged,
    }
}

fn moved(before: &SlotRequest, after: &SlotRequest) -> bool {
    before.slot_start != after.slot_start
        || before.slot_end != after.slot_end
        || before.room_id != after.room_id
}

/// Whether the edit answers the request and so refreshes `response_date`.
pub fn stamps_response(before: &SlotRequest, after: &SlotRequest) -> bool {
    before.status != after.status && after.status.is_response()
}
