//! # Booking workflow
//!
//! Runs request edits, request deletion and direct slot booking as single
//! units of work. Each operation opens a [`BookingTransaction`], applies the
//! decision from [`crate::state_machine`] and commits; any error drops the
//! transaction so no half-applied edit is ever visible.
//!
//! Booked slots in one room never overlap: materializing, rescheduling or
//! booking onto an occupied range fails with [`BookingError::Conflict`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        request::{RequestChanges, SlotRequest},
        slot::{BookSlotRequest, NewSlot, Slot, SlotStatus},
    },
    offset::StorageOffset,
    repository::{BookingStore, BookingTransaction},
    state_machine::{plan_transition, stamps_response, SlotEffect},
};

#[derive(Clone)]
pub struct BookingWorkflow {
    store: Arc<dyn BookingStore>,
    offset: StorageOffset,
}

impl BookingWorkflow {
    pub fn new(store: Arc<dyn BookingStore>, offset: StorageOffset) -> Self {
        Self { store, offset }
    }

    /// Applies a partial edit and the slot side effect it implies.
    pub async fn update_request(
        &self,
        id: Uuid,
        changes: &RequestChanges,
    ) -> BookingResult<SlotRequest> {
        let mut tx = self.store.begin().await?;

        let before = tx
            .find_request(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Request with ID {} not found", id)))?;

        let mut after = before.clone();
        after.apply(changes);
        if after.slot_end <= after.slot_start {
            return Err(BookingError::Validation(
                "slot_end must be after slot_start".to_string(),
            ));
        }

        let effect = plan_transition(&before, &after);
        debug!(request_id = %id, from = %before.status, to = %after.status, ?effect, "Applying request transition");

        match effect {
            SlotEffect::Unchanged => {}
            SlotEffect::Materialize => {
                let slot = self.materialize(tx.as_mut(), &after).await?;
                after.slot_id = Some(slot.id);
            }
            SlotEffect::Reschedule { slot_id } => match tx.find_slot(slot_id).await? {
                Some(slot) => {
                    self.reschedule(tx.as_mut(), slot, &after).await?;
                }
                None => {
                    let slot = self.materialize(tx.as_mut(), &after).await?;
                    after.slot_id = Some(slot.id);
                }
            },
            SlotEffect::Retract { slot_id } => {
                tx.delete_slot(slot_id).await?;
                after.slot_id = None;
            }
        }

        if stamps_response(&before, &after) {
            after.response_date = Some(Utc::now());
        }

        let saved = tx.save_request(&after).await?;
        tx.commit().await?;

        info!(request_id = %id, status = %saved.status, slot_id = ?saved.slot_id, "Request updated");
        Ok(saved)
    }

    /// Deletes a request, retracting its slot first when it was approved.
    pub async fn delete_request(&self, id: Uuid) -> BookingResult<SlotRequest> {
        let mut tx = self.store.begin().await?;

        let request = tx
            .find_request(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Request with ID {} not found", id)))?;

        if request.is_approved() {
            if let Some(slot_id) = request.slot_id {
                tx.delete_slot(slot_id).await?;
            }
        }
        tx.delete_request(id).await?;
        tx.commit().await?;

        info!(request_id = %id, slot_id = ?request.slot_id, "Request deleted");
        Ok(request)
    }

    /// Books a slot directly. An available slot already starting at the same
    /// instant in the room is flipped to booked; a booked one is a conflict.
    pub async fn book_slot(&self, booking: &BookSlotRequest) -> BookingResult<Slot> {
        let slot_end = booking.resolved_end()?;
        if slot_end <= booking.slot_start {
            return Err(BookingError::Validation(
                "slot_end must be after slot_start".to_string(),
            ));
        }

        let mut tx = self.store.begin().await?;

        let existing = tx.find_slot_at(booking.room_id, booking.slot_start).await?;
        if existing.as_ref().is_some_and(Slot::is_booked) {
            return Err(BookingError::Conflict("Slot is already booked".to_string()));
        }

        let exclude = existing.as_ref().map(|slot| slot.id);
        ensure_free(tx.as_mut(), booking.room_id, booking.slot_start, slot_end, exclude).await?;

        let slot = match existing {
            Some(mut slot) => {
                slot.status = SlotStatus::Booked;
                slot.band_id = booking.band_id;
                slot.slot_end = slot_end;
                tx.save_slot(&slot).await?
            }
            None => {
                tx.insert_slot(NewSlot {
                    slot_start: booking.slot_start,
                    slot_end,
                    status: SlotStatus::Booked,
                    band_id: booking.band_id,
                    room_id: booking.room_id,
                })
                .await?
            }
        };
        tx.commit().await?;

        info!(slot_id = %slot.id, room_id = %slot.room_id, "Slot booked");
        Ok(slot)
    }

    async fn materialize(
        &self,
        tx: &mut dyn BookingTransaction,
        request: &SlotRequest,
    ) -> BookingResult<Slot> {
        let band_id = tx.user_band(request.user_id).await?.ok_or_else(|| {
            BookingError::NotFound(format!("User with ID {} not found", request.user_id))
        })?;

        let (slot_start, slot_end) = self
            .offset
            .storage_range(request.slot_start, request.slot_end)?;
        ensure_free(tx, request.room_id, slot_start, slot_end, None).await?;

        let slot = tx
            .insert_slot(NewSlot {
                slot_start,
                slot_end,
                status: SlotStatus::Booked,
                band_id,
                room_id: request.room_id,
            })
            .await?;
        debug!(request_id = %request.id, slot_id = %slot.id, %slot_start, "Materialized slot");
        Ok(slot)
    }

    async fn reschedule(
        &self,
        tx: &mut dyn BookingTransaction,
        mut slot: Slot,
        request: &SlotRequest,
    ) -> BookingResult<Slot> {
        let (slot_start, slot_end) = self
            .offset
            .storage_range(request.slot_start, request.slot_end)?;
        ensure_free(tx, request.room_id, slot_start, slot_end, Some(slot.id)).await?;

        slot.slot_start = slot_start;
        slot.slot_end = slot_end;
        slot.room_id = request.room_id;
        let slot = tx.save_slot(&slot).await?;
        debug!(request_id = %request.id, slot_id = %slot.id, %slot_start, "Rescheduled slot");
        Ok(slot)
    }
}

async fn ensure_free(
    tx: &mut dyn BookingTransaction,
    room_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> BookingResult<()> {
    match tx.find_booked_overlap(room_id, start, end, exclude).await? {
        Some(existing) => Err(BookingError::Conflict(format!(
            "Room is already booked from {} to {}",
            existing.slot_start, existing.slot_end
        ))),
        None => Ok(()),
    }
}
