//! # Booking grid
//!
//! Lays a room's slots over a week of ladder cells. A cell is booked when the
//! instant it stands for (day + window start, see
//! [`crate::offset::wall_clock_instant`]) falls inside `[slot_start, slot_end)`
//! of a booked slot in the same room.
//!
//! Runs of booked cells owned by the same band are merged into one span: the
//! first cell carries the run length in `row_span`, the rest are hidden with a
//! span of zero. A run ends as soon as the status or the band changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::BookingResult,
    ladder::{self, TimeWindow, WeekDay},
    models::slot::{SlotStatus, SlotView},
    offset::wall_clock_instant,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub time_key: String,
    pub status: SlotStatus,
    pub band_id: Option<Uuid>,
    pub band_name: Option<String>,
    /// Number of ladder rows this cell spans; `0` when another cell covers it.
    pub row_span: usize,
    pub show: bool,
}

impl GridCell {
    fn available(time_key: &str) -> Self {
        Self {
            time_key: time_key.to_string(),
            status: SlotStatus::Available,
            band_id: None,
            band_name: None,
            row_span: 1,
            show: true,
        }
    }

    fn joins(&self, previous: &GridCell) -> bool {
        self.status == SlotStatus::Booked
            && self.band_id.is_some()
            && previous.status == self.status
            && previous.band_id == self.band_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayColumn {
    pub day: WeekDay,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    pub room_id: Uuid,
    pub week_start: NaiveDate,
    pub previous_week: NaiveDate,
    pub next_week: NaiveDate,
    pub windows: Vec<TimeWindow>,
    pub days: Vec<DayColumn>,
}

impl WeekGrid {
    pub fn cell_count(&self) -> usize {
        self.days.iter().map(|day| day.cells.len()).sum()
    }

    pub fn cell(&self, day_key: &str, time_key: &str) -> Option<&GridCell> {
        self.days
            .iter()
            .find(|column| column.day.key == day_key)?
            .cells
            .iter()
            .find(|cell| cell.time_key == time_key)
    }
}

/// Builds the grid for the week starting on `week_start`.
///
/// Slots from other rooms are ignored, so callers may pass an unfiltered list.
/// Fails with a validation error when the week touches the calendar's edge.
pub fn build_week_grid(
    room_id: Uuid,
    week_start: NaiveDate,
    windows: &[TimeWindow],
    slots: &[SlotView],
) -> BookingResult<WeekGrid> {
    let room_slots: Vec<&SlotView> = slots
        .iter()
        .filter(|view| view.slot.room_id == room_id && view.slot.is_booked())
        .collect();

    let days = ladder::week_days(week_start)?
        .into_iter()
        .map(|day| {
            let mut cells: Vec<GridCell> = windows
                .iter()
                .map(|window| {
                    let instant = wall_clock_instant(day.date, window.start_time);
                    match room_slots.iter().find(|view| view.slot.contains(instant)) {
                        Some(view) => GridCell {
                            time_key: window.key.clone(),
                            status: SlotStatus::Booked,
                            band_id: view.slot.band_id,
                            band_name: view.band_name.clone(),
                            row_span: 1,
                            show: true,
                        },
                        None => GridCell::available(&window.key),
                    }
                })
                .collect();
            merge_spans(&mut cells);
            DayColumn { day, cells }
        })
        .collect();

    Ok(WeekGrid {
        room_id,
        week_start,
        previous_week: ladder::previous_week(week_start)?,
        next_week: ladder::next_week(week_start)?,
        windows: windows.to_vec(),
        days,
    })
}

/// Collapses runs of same-band booked cells within one day.
pub fn merge_spans(cells: &mut [GridCell]) {
    let mut head = 0;
    while head < cells.len() {
        let mut tail = head + 1;
        while tail < cells.len() && cells[tail].joins(&cells[tail - 1]) {
            tail += 1;
        }

        cells[head].row_span = tail - head;
        cells[head].show = true;
        for covered in &mut cells[head + 1..tail] {
            covered.row_span = 0;
            covered.show = false;
        }
        head = tail;
    }
}
