use super::*;
use crate::mra::{MraPart, MraRom};

#[test]
fn test_zero_key() {
    let key = Cps2Key::decode(&[0u8; KEY_LEN]);
    assert_eq!(key.master, [0, 0]);
    assert_eq!(key.watchdog, [0, 0, 0]);
    assert_eq!(key.lower, 0);
    assert_eq!(key.upper, 0x1000000);
    assert!(!key.is_dead_board());
}

#[test]
fn test_dead_board_key() {
    let key = Cps2Key::decode(&[0xFFu8; KEY_LEN]);
    assert_eq!(key.master, [0xFFFF_FFFF, 0xFFFF_FFFF]);
    assert_eq!(key.watchdog, [0xFFFF, 0xFFFF, 0xFFFF]);
    assert_eq!(key.lower, 0xFF0000);
    assert_eq!(key.upper, 0xFFFFFF);
    assert!(key.is_dead_board());
}

#[test]
fn test_range_bit_position() {
    // Key bit 0 (MSB of byte 0) lands in bit 2 of the range word.
    let mut raw = [0u8; KEY_LEN];
    raw[0] = 0x80;
    let key = Cps2Key::decode(&raw);
    assert_eq!(key.master, [0, 0]);
    assert_eq!(key.lower, 0);
    assert_eq!(key.upper, 0xFF0000);
}

#[test]
fn test_master_bit_position() {
    // Key bit 157 lands in the MSB of the first master word.
    let mut raw = [0u8; KEY_LEN];
    raw[19] = 0x04;
    let key = Cps2Key::decode(&raw);
    assert_eq!(key.master, [0x8000_0000, 0]);
}

#[test]
fn test_from_hex_spaced_and_packed() {
    let spaced = "04 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 04";
    let packed: String = spaced.split(' ').collect();
    let a = Cps2Key::from_hex(spaced).unwrap();
    let b = Cps2Key::from_hex(&packed).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.master[0], 0x8000_0000);
}

#[test]
fn test_from_hex_wrong_length() {
    let result = Cps2Key::from_hex("00 11 22");
    assert!(matches!(result, Err(MraError::InvalidKey(_))));
}

#[test]
fn test_from_hex_invalid_digit() {
    let text = "ZZ".repeat(KEY_LEN);
    assert!(matches!(
        Cps2Key::from_hex(&text),
        Err(MraError::InvalidKey(_))
    ));
}

#[test]
fn test_from_mra_region() {
    let mra = MraFile {
        rbf: "jtcps2".to_string(),
        setname: "ssf2".to_string(),
        roms: vec![
            MraRom {
                index: 0,
                parts: vec![MraPart {
                    data: "00 01".to_string(),
                    ..Default::default()
                }],
            },
            MraRom {
                index: 1,
                parts: vec![
                    MraPart {
                        data: "ff ff ff ff ff ff ff ff ff ff".to_string(),
                        ..Default::default()
                    },
                    MraPart {
                        data: "FF".to_string(),
                        repeat: Some("10".to_string()),
                        ..Default::default()
                    },
                ],
            },
        ],
    };
    let key = Cps2Key::from_mra(&mra, 1).unwrap();
    assert!(key.is_dead_board());
    assert!(Cps2Key::from_mra(&mra, 0).is_err());
    assert!(Cps2Key::from_mra(&mra, 5).is_err());
}

#[test]
fn test_display() {
    let key = Cps2Key::decode(&[0xFFu8; KEY_LEN]);
    assert_eq!(
        key.to_string(),
        "master key : FFFFFFFF FFFFFFFF\n\
         watchdog   : FFFF FFFF FFFF\n\
         encrypted  : FF0000-FFFFFF (dead board)"
    );
}
