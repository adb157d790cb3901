use crate::error::{SteamError, EMPTY_OR_NAN};
use crate::steam_id::{
    to_full_id, to_legacy_id, to_small_id, FullId, LegacyId, SmallId, BASE_OFFSET,
};

#[test]
fn test_known_account_conversions() {
    assert_eq!(to_small_id("76561197960265730").unwrap(), SmallId::new(2));
    assert_eq!(to_full_id("2").unwrap(), FullId::new(76561197960265730));
    assert_eq!(
        to_legacy_id("76561197960265730").unwrap().to_string(),
        "STEAM_0:0:1"
    );
}

#[test]
fn test_odd_id_uses_universe_one() {
    // offset 22202, last digit 0 -> universe 0
    assert_eq!(
        to_legacy_id("76561197960287930").unwrap().to_string(),
        "STEAM_0:0:11101"
    );
    // offset 3, last digit 1 -> universe 1, account (3 - 1) / 2
    let legacy = to_legacy_id("76561197960265731").unwrap();
    assert_eq!(legacy.universe(), 1);
    assert_eq!(legacy.account(), 1);
    assert_eq!(legacy.to_string(), "STEAM_0:1:1");
}

#[test]
fn test_small_full_round_trip() {
    let ids = [
        BASE_OFFSET + 1,
        76561197960265730,
        76561197960287930,
        76561198000000001,
        u128::from(u64::MAX),
        u128::from(u64::MAX) + 1,
    ];

    for id in ids {
        let full = FullId::new(id);
        let small = full.to_small_id().unwrap();
        assert_eq!(small.to_full_id().unwrap(), full, "round trip of {id}");
        assert_eq!(
            to_full_id(&small.to_string()).unwrap(),
            full,
            "text round trip of {id}"
        );
    }
}

#[test]
fn test_legacy_formula_over_offsets() {
    for k in 1..=500u128 {
        let full = BASE_OFFSET + k;
        let universe = ((full % 10) % 2) as u8;
        let expected = format!("STEAM_0:{}:{}", universe, (k - u128::from(universe)) / 2);

        let legacy = to_legacy_id(&full.to_string()).unwrap();
        assert_eq!(legacy.to_string(), expected, "offset {k}");
    }
}

#[test]
fn test_legacy_string_round_trip() {
    for id in ["76561197960265730", "76561197960265731", "76561198012345679"] {
        let full = id.parse::<FullId>().unwrap();
        let legacy = full.to_legacy_id().unwrap();
        let parsed = legacy.to_string().parse::<LegacyId>().unwrap();
        assert_eq!(parsed, legacy);
        assert_eq!(parsed.to_full_id().unwrap(), full);
    }
}

#[test]
fn test_legacy_parse_accepts_steam_one_prefix() {
    let legacy = "STEAM_1:0:11101".parse::<LegacyId>().unwrap();
    assert_eq!(
        legacy.to_full_id().unwrap(),
        FullId::new(76561197960287930)
    );
}

#[test]
fn test_legacy_parse_rejects_garbage() {
    for input in [
        "",
        "STEAM_0:2:1",
        "STEAM_5:0:1",
        "STEAM_0:0",
        "STEAM_0:0:1:1",
        "STEAM_0:0:-1",
        "STEAM_0:0:abc",
        "[U:1:22202]",
    ] {
        assert!(
            matches!(input.parse::<LegacyId>(), Err(SteamError::InvalidArgument(_))),
            "{input:?} should be rejected"
        );
    }
}

#[test]
fn test_empty_or_non_numeric_input_rejected() {
    for input in ["", "   ", "abc", "12a", "-5", "1e5", "2.5", "0", "00", "+"] {
        for result in [
            to_small_id(input).map(|_| ()),
            to_full_id(input).map(|_| ()),
            to_legacy_id(input).map(|_| ()),
        ] {
            match result {
                Err(SteamError::InvalidArgument(msg)) => assert_eq!(msg, EMPTY_OR_NAN),
                other => panic!("{input:?} should be invalid, got {other:?}"),
            }
        }
    }
}

#[test]
fn test_whitespace_and_plus_sign_accepted() {
    assert_eq!(to_small_id(" 76561197960265730 ").unwrap(), SmallId::new(2));
    assert_eq!(to_full_id("+2").unwrap(), FullId::new(76561197960265730));
}

#[test]
fn test_legacy_at_base_offset_unavailable() {
    let result = to_legacy_id(&BASE_OFFSET.to_string());
    assert!(matches!(result, Err(SteamError::ConversionUnavailable(_))));
}

#[test]
fn test_legacy_below_base_offset_unavailable() {
    let result = to_legacy_id("12345");
    assert!(matches!(result, Err(SteamError::ConversionUnavailable(_))));
}

#[test]
fn test_small_id_below_base_offset_unavailable() {
    let result = to_small_id("12345");
    assert!(matches!(result, Err(SteamError::ConversionUnavailable(_))));
}

#[test]
fn test_small_id_at_base_offset_is_zero() {
    assert_eq!(
        FullId::new(BASE_OFFSET).to_small_id().unwrap(),
        SmallId::new(0)
    );
}

#[test]
fn test_values_beyond_64_bits_convert_exactly() {
    // u64::MAX + 1
    assert_eq!(
        to_small_id("18446744073709551616").unwrap().to_string(),
        "18370182875749285888"
    );
    assert_eq!(
        to_full_id("18446744073709551615").unwrap().to_string(),
        "18523305271669817343"
    );
    assert_eq!(
        to_full_id(&to_small_id("18446744073709551616").unwrap().to_string()).unwrap(),
        FullId::new(18446744073709551616)
    );
    assert_eq!(
        to_legacy_id("18446744073709551616").unwrap().to_string(),
        "STEAM_0:0:9185091437874642944"
    );
}

#[test]
fn test_values_beyond_128_bits_unavailable() {
    // u128::MAX + 1
    let result = to_small_id("340282366920938463463374607431768211456");
    assert!(matches!(result, Err(SteamError::ConversionUnavailable(_))));

    let small = (u128::MAX - BASE_OFFSET + 1).to_string();
    assert!(matches!(
        to_full_id(&small),
        Err(SteamError::ConversionUnavailable(_))
    ));
}

#[test]
fn test_cache_key() {
    assert_eq!(SmallId::new(22202).cache_key(), "profile_22202");
}

#[test]
fn test_ids_serialize_as_numbers() {
    let full = FullId::new(76561197960265730);
    assert_eq!(serde_json::to_string(&full).unwrap(), "76561197960265730");
    let small: SmallId = serde_json::from_str("2").unwrap();
    assert_eq!(small, SmallId::new(2));
}
