use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SimError, SimResult};
use crate::state::SessionState;

pub const SESSION_SNAPSHOT_SCHEMA_V1: u32 = 1;

/// Versioned envelope written to the session store.
///
/// Every field of the nested session falls back to its default when absent,
/// so snapshots written by older builds still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshotContractV1 {
    pub schema_version: u32,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub session: SessionState,
}

impl SessionSnapshotContractV1 {
    #[must_use]
    pub fn new(session: SessionState, saved_at: Option<DateTime<Utc>>) -> Self {
        Self {
            schema_version: SESSION_SNAPSHOT_SCHEMA_V1,
            saved_at,
            session,
        }
    }

    pub fn to_json_bytes(&self) -> SimResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            SimError::InvalidData(format!("failed to serialize session snapshot v1: {e}"))
        })
    }

    pub fn to_json_pretty(&self) -> SimResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SimError::InvalidData(format!("failed to serialize session snapshot v1: {e}"))
        })
    }

    /// Parses a v1 envelope, or a bare session object written without one.
    pub fn from_json_compat_slice(input: &[u8]) -> SimResult<Self> {
        let value: Value = serde_json::from_slice(input)
            .map_err(|e| SimError::CorruptState(format!("snapshot is not valid json: {e}")))?;
        let Value::Object(object) = &value else {
            return Err(SimError::CorruptState(
                "snapshot root must be a json object".to_owned(),
            ));
        };

        if !object.contains_key("schema_version") {
            let session: SessionState = serde_json::from_value(value).map_err(|e| {
                SimError::CorruptState(format!("failed to parse bare session payload: {e}"))
            })?;
            return Ok(Self::new(session, None));
        }

        let payload: Self = serde_json::from_value(value).map_err(|e| {
            SimError::CorruptState(format!("failed to parse session snapshot payload: {e}"))
        })?;
        if payload.schema_version != SESSION_SNAPSHOT_SCHEMA_V1 {
            return Err(SimError::UnsupportedSchemaVersion(payload.schema_version));
        }
        Ok(payload)
    }
}
