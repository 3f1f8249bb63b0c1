//! https://graphics.stanford.edu/~seander/bithacks.html#InterleaveBMN

const SPREAD_MASKS: [u64; 5] = [
    0x0000_FFFF_0000_FFFF,
    0x00FF_00FF_00FF_00FF,
    0x0F0F_0F0F_0F0F_0F0F,
    0x3333_3333_3333_3333,
    0x5555_5555_5555_5555,
];
const SPREAD_SHIFTS: [u32; 5] = [16, 8, 4, 2, 1];

const SQUASH_MASKS: [u64; 6] = [
    0x5555_5555_5555_5555,
    0x3333_3333_3333_3333,
    0x0F0F_0F0F_0F0F_0F0F,
    0x00FF_00FF_00FF_00FF,
    0x0000_FFFF_0000_FFFF,
    0x0000_0000_FFFF_FFFF,
];
const SQUASH_SHIFTS: [u32; 6] = [0, 1, 2, 4, 8, 16];

/// u32の各ビットを1つおきに広げ、偶数ビットに配置する。
const fn spread(x: u32) -> u64 {
    let mut x = x as u64;
    x = (x | (x << SPREAD_SHIFTS[0])) & SPREAD_MASKS[0];
    x = (x | (x << SPREAD_SHIFTS[1])) & SPREAD_MASKS[1];
    x = (x | (x << SPREAD_SHIFTS[2])) & SPREAD_MASKS[2];
    x = (x | (x << SPREAD_SHIFTS[3])) & SPREAD_MASKS[3];
    x = (x | (x << SPREAD_SHIFTS[4])) & SPREAD_MASKS[4];
    x
}

/// [`spread`]の逆。偶数ビットだけを詰めてu32に戻す。
const fn squash(x: u64) -> u32 {
    let mut x = x;
    x = (x | (x >> SQUASH_SHIFTS[0])) & SQUASH_MASKS[0];
    x = (x | (x >> SQUASH_SHIFTS[1])) & SQUASH_MASKS[1];
    x = (x | (x >> SQUASH_SHIFTS[2])) & SQUASH_MASKS[2];
    x = (x | (x >> SQUASH_SHIFTS[3])) & SQUASH_MASKS[3];
    x = (x | (x >> SQUASH_SHIFTS[4])) & SQUASH_MASKS[4];
    x = (x | (x >> SQUASH_SHIFTS[5])) & SQUASH_MASKS[5];
    x as u32
}

/// 2つのu32を1つのu64にインターリーブする。
///
/// `x` の第iビットは結果の第2iビットに、`y` の第iビットは第2i+1ビットに入る。
///
/// ```
/// # use geohash_logic::interleave64;
/// assert_eq!(interleave64(1, 2), 0b1001);
/// assert_eq!(interleave64(u32::MAX, 0), 0x5555_5555_5555_5555);
/// assert_eq!(interleave64(0, u32::MAX), 0xAAAA_AAAA_AAAA_AAAA);
/// ```
pub const fn interleave64(x: u32, y: u32) -> u64 {
    spread(x) | (spread(y) << 1)
}

/// [`interleave64`]の逆変換。偶数ビットを `x`、奇数ビットを `y` として返す。
///
/// ```
/// # use geohash_logic::{deinterleave64, interleave64};
/// assert_eq!(deinterleave64(interleave64(0b1011, 0b0110)), (0b1011, 0b0110));
/// ```
pub const fn deinterleave64(interleaved: u64) -> (u32, u32) {
    (squash(interleaved), squash(interleaved >> 1))
}
