//! Property tests for pack parsing and unit conversion.

use clinic_rx_core::packaging::{compose_pack_name, parse_pack_info, ConversionError};
use clinic_rx_core::{PackInfo, PackSize};
use proptest::prelude::*;

proptest! {
    #[test]
    fn packaged_names_round_trip(
        base in "[A-Za-z][A-Za-z0-9 ]{0,20}[A-Za-z0-9]",
        size in any::<u32>(),
        unit in "[A-Za-z][A-Za-z0-9_]{0,10}",
    ) {
        let info = parse_pack_info(&compose_pack_name(&base, size, &unit));

        prop_assert_eq!(info.base_name, base.trim());
        prop_assert_eq!(info.pack, Some(PackSize::new(size, unit)));
    }

    #[test]
    fn names_without_suffix_are_plain(name in "[A-Za-z0-9 .,-]{0,40}") {
        let info = parse_pack_info(&name);

        prop_assert!(!info.has_pack_info());
        prop_assert_eq!(info.base_name, name);
    }

    #[test]
    fn units_to_packs_and_back(units in 0.0f64..1_000_000.0, size in 1u32..10_000) {
        let info = PackInfo::packaged("Tab X", size, "tablets");

        let packs = info.to_storage_units(units).unwrap();
        let back = info.to_dispensing_units(packs).unwrap();

        prop_assert!((back - units).abs() <= 1e-9 * units.max(1.0));
    }

    #[test]
    fn zero_pack_size_never_divides(units in -1_000_000.0f64..1_000_000.0) {
        let info = PackInfo::packaged("Tab X", 0, "tablets");

        prop_assert_eq!(info.to_storage_units(units), Err(ConversionError::DivisionByZero));
        prop_assert_eq!(info.to_dispensing_units(units), Ok(0.0 * units));
    }

    #[test]
    fn plain_names_refuse_conversion(name in "[A-Za-z ]{1,20}", quantity in 0.0f64..1000.0) {
        let info = parse_pack_info(&name);

        prop_assert_eq!(
            info.to_storage_units(quantity),
            Err(ConversionError::MissingPackInfo(name))
        );
    }
}
