// Transfer Models
// Send mode and received-transfer history records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How outgoing transfers pick their recipients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendMode {
    #[default]
    Single,
    Multiple,
    Link,
}

impl SendMode {
    pub fn as_name(&self) -> &'static str {
        match self {
            SendMode::Single => "single",
            SendMode::Multiple => "multiple",
            SendMode::Link => "link",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "single" => Some(SendMode::Single),
            "multiple" => Some(SendMode::Multiple),
            "link" => Some(SendMode::Link),
            _ => None,
        }
    }
}

/// Coarse classification of a received file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Video,
    Pdf,
    Text,
    Apk,
    Other,
}

/// One previously received transfer. Each entry is persisted as its own
/// JSON document inside the backend's string-list, so the list round-trips
/// without re-encoding untouched entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveHistoryEntry {
    /// Unique identifier of the transfer
    pub id: String,

    /// File name as received
    pub file_name: String,

    /// Coarse file classification
    pub file_kind: FileKind,

    /// Final on-disk location, if the file was kept
    pub path: Option<String>,

    /// Whether the file was routed to the media gallery
    pub saved_to_gallery: bool,

    /// Size in bytes
    pub file_size: u64,

    /// Display name of the sending device
    pub sender_alias: String,

    /// When the transfer completed
    pub timestamp: DateTime<Utc>,
}

impl ReceiveHistoryEntry {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_entry() -> ReceiveHistoryEntry {
        ReceiveHistoryEntry {
            id: "d4f2a9c0".to_string(),
            file_name: "holiday.jpg".to_string(),
            file_kind: FileKind::Image,
            path: Some("/home/user/Pictures/holiday.jpg".to_string()),
            saved_to_gallery: true,
            file_size: 524_288,
            sender_alias: "Clever Mango".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 12, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_entry_json_round_trip() {
        let entry = sample_entry();
        let encoded = entry.to_json().unwrap();
        let decoded = ReceiveHistoryEntry::from_json(&encoded).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_entry_uses_camel_case_wire_names() {
        let encoded = sample_entry().to_json().unwrap();
        assert!(encoded.contains("\"fileName\""));
        assert!(encoded.contains("\"savedToGallery\""));
        assert!(encoded.contains("\"senderAlias\""));
    }

    #[test]
    fn test_send_mode_name_round_trip() {
        for mode in [SendMode::Single, SendMode::Multiple, SendMode::Link] {
            assert_eq!(SendMode::from_name(mode.as_name()), Some(mode));
        }
        assert_eq!(SendMode::from_name("broadcast"), None);
    }
}
