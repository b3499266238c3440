//! Status record posted by the door sensor

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Latest known room/occupancy/door snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct StatusRecord {
    #[validate(length(min = 1, message = "room must not be empty"))]
    pub room: String,

    pub people_count: u32,

    #[validate(range(max = 1, message = "door_state must be 0 (closed) or 1 (open)"))]
    pub door_state: u8,
}

/// Door state derived from `door_state`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorState {
    Open,
    Closed,
}

impl DoorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoorState::Open => "Open",
            DoorState::Closed => "Closed",
        }
    }
}

impl StatusRecord {
    pub fn door(&self) -> DoorState {
        if self.door_state == 1 {
            DoorState::Open
        } else {
            DoorState::Closed
        }
    }
}

/// Acknowledgement for `POST /live-data`
#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    pub status: String,
    pub message: String,
}

impl IngestResponse {
    pub fn received() -> Self {
        Self {
            status: "success".to_string(),
            message: "Data received".to_string(),
        }
    }
}

/// Status view served by `/current-status?format=json`
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentStatus {
    pub room: String,
    pub people_count: u32,
    pub door_status: DoorState,
}

impl From<&StatusRecord> for CurrentStatus {
    fn from(record: &StatusRecord) -> Self {
        Self {
            room: record.room.clone(),
            people_count: record.people_count,
            door_status: record.door(),
        }
    }
}
