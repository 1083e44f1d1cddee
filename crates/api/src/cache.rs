//! Short-lived cache of fetched slot ranges, one entry per room.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use jamroom_core::{models::slot::SlotView, range::DateRange};
use moka::future::Cache;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct CachedSlots {
    range: DateRange,
    slots: Arc<Vec<SlotView>>,
}

/// Remembers the last range fetched for each room. A lookup only hits when
/// the stored range covers the requested one; the hit is narrowed to the
/// requested range before it is returned.
///
/// Every invalidation bumps a generation counter. A fetch records the
/// generation before reading the database and its result is only kept if no
/// invalidation happened in between.
#[derive(Clone)]
pub struct SlotRangeCache {
    cache: Cache<Uuid, CachedSlots>,
    generation: Arc<AtomicU64>,
}

impl SlotRangeCache {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(64).time_to_live(ttl).build();
        Self {
            cache,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Read before fetching; pass the value to [`SlotRangeCache::store`].
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn get_covering(&self, room_id: Uuid, requested: &DateRange) -> Option<Vec<SlotView>> {
        let entry = self.cache.get(&room_id).await?;
        if !entry.range.covers(requested) {
            return None;
        }

        debug!(%room_id, "Slot cache hit");
        Some(
            entry
                .slots
                .iter()
                .filter(|view| requested.contains(view.slot.slot_start))
                .cloned()
                .collect(),
        )
    }

    /// Keeps `slots` unless the cache was invalidated after `generation` was read.
    pub async fn store(
        &self,
        room_id: Uuid,
        range: DateRange,
        slots: Vec<SlotView>,
        generation: u64,
    ) {
        if self.generation() != generation {
            debug!(%room_id, "Skipping stale slot range");
            return;
        }

        self.cache
            .insert(
                room_id,
                CachedSlots {
                    range,
                    slots: Arc::new(slots),
                },
            )
            .await;

        // An invalidation may have landed between the check and the insert.
        if self.generation() != generation {
            self.cache.invalidate(&room_id).await;
        }
    }

    /// Drops every entry. Called after any write that touches slots.
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cache.invalidate_all();
    }
}
