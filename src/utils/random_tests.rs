use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use crate::utils::{jiggle, unit_sample, Lcg};
use crate::utils::constants::JIGGLE_SCALE;

#[test]
fn test_lcg_first_values() {
    let mut lcg = Lcg::default();
    // 1664525 * 1 + 1013904223
    assert_eq!(lcg.next_u32(), 1_015_568_748);
    // (1664525 * 1015568748 + 1013904223) mod 2^32
    let expected = (1_664_525u64 * 1_015_568_748u64 + 1_013_904_223u64) % (1u64 << 32);
    assert_eq!(lcg.next_u32() as u64, expected);
}

#[test]
fn test_lcg_is_reproducible() {
    let mut a = Lcg::new(42);
    let mut b = Lcg::new(42);
    for _ in 0..100 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn test_lcg_fill_bytes_partial_chunk() {
    let mut lcg = Lcg::default();
    let mut bytes = [0u8; 7];
    lcg.fill_bytes(&mut bytes);
    let mut reference = Lcg::default();
    let first = reference.next_u32().to_le_bytes();
    let second = reference.next_u32().to_le_bytes();
    assert_eq!(&bytes[..4], &first);
    assert_eq!(&bytes[4..], &second[..3]);
}

#[test]
fn test_unit_sample_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let u = unit_sample(&mut rng);
        assert!((0.0..1.0).contains(&u), "sample {} outside [0, 1)", u);
    }
}

#[test]
fn test_jiggle_is_tiny_and_signed() {
    let mut lcg = Lcg::default();
    let mut saw_negative = false;
    let mut saw_positive = false;
    for _ in 0..100 {
        let j = jiggle(&mut lcg);
        assert!(j.abs() <= 0.5 * JIGGLE_SCALE);
        saw_negative |= j < 0.0;
        saw_positive |= j > 0.0;
    }
    assert!(saw_negative && saw_positive);
}
