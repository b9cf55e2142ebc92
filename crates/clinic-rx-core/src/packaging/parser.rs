//! Pack-info parser for medicine display names.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::PackInfo;

// "<label> (1 pack = <N> <unit>)" or "(1 jar = ...)", anchored at both ends.
// Only the container keyword is case-insensitive, and only in ASCII.
static PACK_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<base>.+?)\s*\(1 (?i-u:pack|jar) = (?P<size>[0-9]+)\s+(?P<unit>[A-Za-z0-9_]+)\)$",
    )
    .unwrap()
});

/// Parse packaging metadata from a medicine name.
///
/// Names that do not carry a well-formed suffix are plain items: the whole
/// input is kept as the base name, untrimmed.
pub fn parse_pack_info(name: &str) -> PackInfo {
    let Some(caps) = PACK_SUFFIX_RE.captures(name) else {
        return PackInfo::plain(name);
    };

    let pack_size = match caps["size"].parse::<u32>() {
        Ok(size) => size,
        Err(e) => {
            tracing::warn!(medicine = name, error = %e, "pack size out of range, treating as plain name");
            return PackInfo::plain(name);
        }
    };

    PackInfo::packaged(caps["base"].trim(), pack_size, &caps["unit"])
}

/// Whether a name carries a pack suffix.
pub fn has_pack_suffix(name: &str) -> bool {
    parse_pack_info(name).has_pack_info()
}

/// Compose a packaged medicine name.
pub fn compose_pack_name(base_name: &str, pack_size: u32, pack_unit: &str) -> String {
    format!("{} (1 pack = {} {})", base_name, pack_size, pack_unit)
}
