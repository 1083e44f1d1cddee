//! Read-side joins. Each one is a plain function over lists already loaded
//! through the repositories.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{
    band::Band,
    request::{RequestView, SlotRequest},
    room::Room,
    slot::{Slot, SlotView},
    user::User,
};

pub fn compose_slot_views(slots: Vec<Slot>, bands: &[Band], rooms: &[Room]) -> Vec<SlotView> {
    let band_names: HashMap<Uuid, &str> =
        bands.iter().map(|band| (band.id, band.name.as_str())).collect();
    let room_numbers: HashMap<Uuid, i32> = rooms.iter().map(|room| (room.id, room.number)).collect();

    slots
        .into_iter()
        .map(|slot| SlotView {
            band_name: slot
                .band_id
                .and_then(|id| band_names.get(&id))
                .map(|name| name.to_string()),
            room_number: room_numbers.get(&slot.room_id).copied(),
            slot,
        })
        .collect()
}

/// Resolves `user_id → user.name` and `user_id → band_id → band.name`.
pub fn compose_request_views(
    requests: Vec<SlotRequest>,
    users: &[User],
    bands: &[Band],
) -> Vec<RequestView> {
    let users: HashMap<Uuid, &User> = users.iter().map(|user| (user.id, user)).collect();
    let band_names: HashMap<Uuid, &str> =
        bands.iter().map(|band| (band.id, band.name.as_str())).collect();

    requests
        .into_iter()
        .map(|request| {
            let user = users.get(&request.user_id);
            RequestView {
                user_name: user.map(|user| user.name.clone()),
                band_name: user
                    .and_then(|user| user.band_id)
                    .and_then(|band_id| band_names.get(&band_id))
                    .map(|name| name.to_string()),
                request,
            }
        })
        .collect()
}
