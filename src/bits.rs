//! Bit-slice helpers shared by every header and element decoder.
//!
//! Semantics match `itamae.bits`: all operate on the *whole* magic number,
//! not on a byte-aligned view, so callers are responsible for getting the
//! right width in first.

use indexmap::IndexMap;

/// The low `n` bits of `v`.
pub const fn leastx(n: u32, v: u32) -> u32 {
    v & ((1 << n) - 1)
}

/// The `n` bits of `v` starting at bit `s`.
pub const fn midx(s: u32, n: u32, v: u32) -> u32 {
    leastx(n, v >> s)
}

/// Every bit of `v` from bit `s` upward.
pub const fn mostx(s: u32, v: u32) -> u32 {
    v >> s
}

/// `{name: is_set}` for every `(name, mask)` pair in `map`, tested against `v`.
pub fn bitmask_list(map: &[(&'static str, u32)], v: u32) -> IndexMap<&'static str, bool> {
    map.iter().map(|&(name, mask)| (name, v & mask == mask)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leastx_masks_low_bits() {
        assert_eq!(leastx(2, 0b1111), 0b11);
        assert_eq!(leastx(4, 0xab), 0xb);
    }

    #[test]
    fn midx_extracts_middle_field() {
        // subtype occupies bits 4..8 of the first frame-control octet.
        assert_eq!(midx(4, 4, 0b1011_0000), 0b1011);
    }

    #[test]
    fn mostx_shifts_right() {
        assert_eq!(mostx(14, 0xC000), 0b11);
    }

    #[test]
    fn bitmask_list_reports_each_flag() {
        let map = [("a", 1u32 << 0), ("b", 1u32 << 1), ("c", 1u32 << 2)];
        let flags = bitmask_list(&map, 0b101);
        assert_eq!(flags["a"], true);
        assert_eq!(flags["b"], false);
        assert_eq!(flags["c"], true);
    }
}
