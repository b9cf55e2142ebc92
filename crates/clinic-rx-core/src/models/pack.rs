//! Packaging metadata derived from a medicine name.

use serde::{Deserialize, Serialize};

/// Fallback pack size used by callers that want uniform arithmetic.
pub const DEFAULT_PACK_SIZE: u32 = 1;

/// Fallback dispensing unit label paired with [`DEFAULT_PACK_SIZE`].
pub const DEFAULT_PACK_UNIT: &str = "unit";

/// Packaging metadata of a medicine: its label plus, when declared, how many
/// dispensing units one storage pack holds.
///
/// Never persisted; recomputed from the medicine record whenever needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PackInfoRecord", into = "PackInfoRecord")]
pub struct PackInfo {
    /// Label with the packaging suffix stripped
    pub base_name: String,
    /// Pack size and dispensing unit, absent for plain names
    pub pack: Option<PackSize>,
}

/// How many dispensing units one storage unit ("pack" or "jar") holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackSize {
    /// Dispensing units per storage pack
    pub pack_size: u32,
    /// Dispensing unit name as written (e.g., "tablets")
    pub pack_unit: String,
}

impl PackSize {
    /// Create a pack size.
    pub fn new(pack_size: u32, pack_unit: impl Into<String>) -> Self {
        Self {
            pack_size,
            pack_unit: pack_unit.into(),
        }
    }
}

impl Default for PackSize {
    fn default() -> Self {
        Self::new(DEFAULT_PACK_SIZE, DEFAULT_PACK_UNIT)
    }
}

impl PackInfo {
    /// Pack info for a name without packaging metadata.
    pub fn plain(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            pack: None,
        }
    }

    /// Pack info for a packaged name.
    pub fn packaged(
        base_name: impl Into<String>,
        pack_size: u32,
        pack_unit: impl Into<String>,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            pack: Some(PackSize::new(pack_size, pack_unit)),
        }
    }

    /// Whether the name declared a pack size.
    pub fn has_pack_info(&self) -> bool {
        self.pack.is_some()
    }

    /// Units per pack, if declared.
    pub fn pack_size(&self) -> Option<u32> {
        self.pack.as_ref().map(|p| p.pack_size)
    }

    /// Dispensing unit name, if declared.
    pub fn pack_unit(&self) -> Option<&str> {
        self.pack.as_ref().map(|p| p.pack_unit.as_str())
    }

    /// Pack size, or `1 unit` for plain names.
    ///
    /// Only for uniform display arithmetic. Plain names have no dispensing
    /// unit, so conversions must not rely on this default.
    pub fn pack_or_default(&self) -> PackSize {
        self.pack.clone().unwrap_or_default()
    }

    /// Short summary such as "200 tablets/pack".
    pub fn summary(&self) -> Option<String> {
        self.pack
            .as_ref()
            .map(|p| format!("{} {}/pack", p.pack_size, p.pack_unit))
    }
}

/// Flat JSON shape used by the UI.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackInfoRecord {
    base_name: String,
    has_pack_info: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pack_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pack_unit: Option<String>,
}

impl From<PackInfoRecord> for PackInfo {
    fn from(record: PackInfoRecord) -> Self {
        let pack = match (record.has_pack_info, record.pack_size, record.pack_unit) {
            (true, Some(pack_size), Some(pack_unit)) => Some(PackSize {
                pack_size,
                pack_unit,
            }),
            _ => None,
        };
        Self {
            base_name: record.base_name,
            pack,
        }
    }
}

impl From<PackInfo> for PackInfoRecord {
    fn from(info: PackInfo) -> Self {
        let has_pack_info = info.has_pack_info();
        let (pack_size, pack_unit) = match info.pack {
            Some(p) => (Some(p.pack_size), Some(p.pack_unit)),
            None => (None, None),
        };
        Self {
            base_name: info.base_name,
            has_pack_info,
            pack_size,
            pack_unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_has_no_pack_fields() {
        let info = PackInfo::plain("Cough Syrup 100ml");
        assert!(!info.has_pack_info());
        assert_eq!(info.pack_size(), None);
        assert_eq!(info.pack_unit(), None);
        assert_eq!(info.summary(), None);
    }

    #[test]
    fn test_default_pack_convention() {
        let info = PackInfo::plain("Bandage");
        let pack = info.pack_or_default();
        assert_eq!(pack.pack_size, 1);
        assert_eq!(pack.pack_unit, "unit");

        let info = PackInfo::packaged("Tab Panadol", 200, "tablets");
        assert_eq!(info.pack_or_default().pack_size, 200);
    }

    #[test]
    fn test_json_shape_packaged() {
        let info = PackInfo::packaged("Tab Panadol", 200, "tablets");
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["baseName"], "Tab Panadol");
        assert_eq!(json["hasPackInfo"], true);
        assert_eq!(json["packSize"], 200);
        assert_eq!(json["packUnit"], "tablets");
    }

    #[test]
    fn test_json_shape_plain_omits_pack_fields() {
        let info = PackInfo::plain("Cough Syrup 100ml");
        let json = serde_json::to_string(&info).unwrap();

        assert_eq!(json, r#"{"baseName":"Cough Syrup 100ml","hasPackInfo":false}"#);
    }

    #[test]
    fn test_json_flag_wins_over_stray_fields() {
        let json = r#"{"baseName":"X","hasPackInfo":false,"packSize":5,"packUnit":"caps"}"#;
        let info: PackInfo = serde_json::from_str(json).unwrap();
        assert!(!info.has_pack_info());
    }
}
