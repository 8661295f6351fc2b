use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::prize::Prize;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WinRecord {
    pub id: String,
    pub prize: Prize,
    pub timestamp_millis: i64,
}

impl WinRecord {
    pub fn new(prize: Prize, timestamp_millis: i64) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            prize,
            timestamp_millis,
        }
    }

    /// Local wall-clock "HH:MM" of the win, as shown in the recent-wins list.
    pub fn clock_label(&self) -> String {
        match Local.timestamp_millis_opt(self.timestamp_millis).single() {
            Some(at) => at.format("%H:%M").to_string(),
            None => String::from("--:--"),
        }
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Append-only session log of wins, oldest first.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<WinRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, record: WinRecord) -> &WinRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[WinRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&WinRecord> {
        self.records.last()
    }

    /// Newest first, for display.
    pub fn recent(&self) -> impl Iterator<Item = &WinRecord> {
        self.records.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Wins per prize id, in first-won order.
    pub fn tally(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|(id, _)| *id == record.prize.id) {
                Some((_, n)) => *n += 1,
                None => counts.push((record.prize.id.as_str(), 1)),
            }
        }
        counts
    }
}
