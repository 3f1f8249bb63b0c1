use std::fmt;

#[cfg(test)]
use proptest::prelude::*;
#[cfg(any(test, feature = "random"))]
use rand::Rng;
#[cfg(any(test, feature = "random"))]
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    geohash::{
        constants::STEP_MAX,
        interleave::interleave64,
        range::{CoordRanges, CoordinateRange},
    },
};

/// GeoHashは座標をインターリーブしたビット列で表す型。
///
/// `bits` の下位 `2 * step` ビットに、緯度の固定小数点値が偶数ビット、
/// 経度の固定小数点値が奇数ビットとして格納されている。
///
/// この型は `PartialOrd` / `Ord` を実装していますが、これは主に`BTreeSet` や `BTreeMap` などの順序付きコレクションでの格納・探索用であり、実際の空間的な「大小」を意味するものではない。
///
/// ```
/// pub struct GeoHash {
///     bits: u64,
///     step: u8,
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawGeoHash")]
pub struct GeoHash {
    bits: u64,
    step: u8,
}

#[derive(Deserialize)]
struct RawGeoHash {
    bits: u64,
    step: u8,
}

impl TryFrom<RawGeoHash> for GeoHash {
    type Error = Error;

    fn try_from(raw: RawGeoHash) -> Result<Self, Self::Error> {
        GeoHash::new(raw.bits, raw.step)
    }
}

impl fmt::Display for GeoHash {
    /// `GeoHash` を `"{step}/{bits}"` の形式で表示する。
    ///
    /// ```
    /// # use geohash_logic::GeoHash;
    /// let hash = GeoHash::new(0b1001, 2).unwrap();
    /// assert_eq!(hash.to_string(), "2/9");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.step, self.bits)
    }
}

/// ステップ `step` で有効な下位 `2 * step` ビットのマスク。
pub(crate) const fn cell_mask(step: u8) -> u64 {
    u64::MAX >> (64 - 2 * step as u32)
}

fn check_step(step: u8) -> Result<(), Error> {
    if step == 0 || step > STEP_MAX {
        tracing::debug!(step, "step out of range");
        return Err(Error::StepOutOfRange { step });
    }
    Ok(())
}

/// 値域内の座標を `[0, 2^step)` の固定小数点値に変換する。
///
/// 小数部は切り捨てる。上限ちょうどの値は最後のセルに含める。
fn fixed_offset(range: &CoordinateRange, value: f64, step: u8) -> u32 {
    let cells = 1u64 << step;
    let offset = (value - range.min) / range.length() * cells as f64;
    (offset as u64).min(cells - 1) as u32
}

impl GeoHash {
    /// 指定されたビット列とステップから [`GeoHash`] を構築します。
    ///
    /// # バリデーション
    /// - `step` が `1..=32` の範囲外の場合、[`Error::StepOutOfRange`] を返します。
    /// - `bits` が下位 `2 * step` ビットに収まらない場合、[`Error::BitsOutOfRange`] を返します。
    ///
    /// `bits == 0` は未初期化を表す値であり構築はできますが、復号では拒否されます。
    ///
    /// ```
    /// # use geohash_logic::{Error, GeoHash};
    /// let hash = GeoHash::new(0b1110, 2).unwrap();
    /// assert_eq!(hash.bits(), 0b1110);
    /// assert_eq!(hash.step(), 2);
    ///
    /// assert_eq!(GeoHash::new(0b10000, 2), Err(Error::BitsOutOfRange { bits: 0b10000, step: 2 }));
    /// assert_eq!(GeoHash::new(1, 33), Err(Error::StepOutOfRange { step: 33 }));
    /// ```
    pub fn new(bits: u64, step: u8) -> Result<GeoHash, Error> {
        check_step(step)?;
        if bits & !cell_mask(step) != 0 {
            return Err(Error::BitsOutOfRange { bits, step });
        }
        Ok(GeoHash { bits, step })
    }

    /// 検証を行わずに構築する。呼び出し側が `step` と `bits` の整合性を保証する。
    pub(crate) const fn from_raw(bits: u64, step: u8) -> GeoHash {
        GeoHash { bits, step }
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    /// 未初期化を表すビット列 0 かどうか。
    pub fn is_zero(&self) -> bool {
        self.bits == 0
    }

    /// 座標を指定されたステップの [`GeoHash`] に符号化します。
    ///
    /// 各座標を値域の中の `[0, 1)` の割合に正規化し、`2^step` 倍して切り捨てた整数を
    /// 緯度を偶数ビット、経度を奇数ビットとしてインターリーブします。
    /// 値域の両端は範囲内として扱います。
    ///
    /// # バリデーション
    /// - `step` が `1..=32` の範囲外の場合、[`Error::StepOutOfRange`] を返します。
    /// - 値域が有限かつ `min < max` でない場合、[`Error::DegenerateRange`] を返します。
    /// - 座標が値域外、またはNaNの場合、[`Error::LatitudeOutOfRange`]、
    ///   [`Error::LongitudeOutOfRange`] を返します。
    ///
    /// ```
    /// # use geohash_logic::{CoordinateSystem, Error, GeoHash};
    /// let ranges = CoordinateSystem::Wgs84.ranges();
    /// let hash = GeoHash::encode(&ranges, 40.7126674, -74.0131594, 26).unwrap();
    /// assert_eq!(hash.bits(), 1791873972053022);
    /// assert_eq!(hash.step(), 26);
    ///
    /// let result = GeoHash::encode(&ranges, 86.0, 0.0, 26);
    /// assert_eq!(result, Err(Error::LatitudeOutOfRange { latitude: 86.0 }));
    /// ```
    pub fn encode(
        ranges: &CoordRanges,
        latitude: f64,
        longitude: f64,
        step: u8,
    ) -> Result<GeoHash, Error> {
        check_step(step)?;
        ranges.latitude.check()?;
        ranges.longitude.check()?;

        if !ranges.latitude.contains(latitude) {
            tracing::debug!(latitude, step, "latitude out of range");
            return Err(Error::LatitudeOutOfRange { latitude });
        }
        if !ranges.longitude.contains(longitude) {
            tracing::debug!(longitude, step, "longitude out of range");
            return Err(Error::LongitudeOutOfRange { longitude });
        }

        let lat = fixed_offset(&ranges.latitude, latitude, step);
        let lon = fixed_offset(&ranges.longitude, longitude, step);

        Ok(GeoHash {
            bits: interleave64(lat, lon),
            step,
        })
    }

    /// ステップを `difference` だけ下げた親セルを返します。
    ///
    /// ステップが0以下になる場合は親が存在しないため `None` を返します。
    ///
    /// ```
    /// # use geohash_logic::GeoHash;
    /// let hash = GeoHash::new(0b11_10_01, 3).unwrap();
    /// assert_eq!(hash.parent(1), Some(GeoHash::new(0b11_10, 2).unwrap()));
    /// assert_eq!(hash.parent(2), Some(GeoHash::new(0b11, 1).unwrap()));
    /// assert!(hash.parent(3).is_none());
    /// ```
    pub fn parent(&self, difference: u8) -> Option<GeoHash> {
        let step = self.step.checked_sub(difference)?;
        if step == 0 {
            return None;
        }
        Some(GeoHash {
            bits: self.bits >> (2 * difference as u32),
            step,
        })
    }

    /// 1段階細かいステップの4つの子セルを返します。
    ///
    /// 順序は南西、北西、南東、北東（追加される下位2ビットが `00, 01, 10, 11`）。
    ///
    /// # バリデーション
    /// - ステップが既に32の場合、[`Error::StepOutOfRange`] を返します。
    ///
    /// ```
    /// # use geohash_logic::GeoHash;
    /// let hash = GeoHash::new(0b10, 1).unwrap();
    /// let children = hash.children().unwrap();
    /// assert_eq!(children[0].bits(), 0b10_00);
    /// assert_eq!(children[3].bits(), 0b10_11);
    /// assert!(children.iter().all(|c| c.step() == 2));
    /// ```
    pub fn children(&self) -> Result<[GeoHash; 4], Error> {
        if self.step >= STEP_MAX {
            return Err(Error::StepOutOfRange {
                step: self.step + 1,
            });
        }
        let base = self.bits << 2;
        let step = self.step + 1;
        Ok([0, 1, 2, 3].map(|quadrant| GeoHash {
            bits: base | quadrant,
            step,
        }))
    }

    /// `other` のセルがこのセルの内側（同じセルを含む）にあるかを返します。
    ///
    /// ```
    /// # use geohash_logic::GeoHash;
    /// let parent = GeoHash::new(0b10, 1).unwrap();
    /// assert!(parent.contains(&GeoHash::new(0b10_01, 2).unwrap()));
    /// assert!(!parent.contains(&GeoHash::new(0b01_01, 2).unwrap()));
    /// ```
    pub fn contains(&self, other: &GeoHash) -> bool {
        match other.step.checked_sub(self.step) {
            Some(difference) => other.bits >> (2 * difference as u32) == self.bits,
            None => false,
        }
    }

    /// 指定されたステップ範囲内でランダムな [`GeoHash`] を生成します。
    #[cfg(any(test, feature = "random"))]
    pub fn random_within(steps: RangeInclusive<u8>) -> Self {
        let mut rng = rand::rng();
        Self::random_within_using(&mut rng, steps)
    }

    /// 外部の乱数生成器を使用してランダムな [`GeoHash`] を生成します。
    ///
    /// ステップ範囲は `1..=32` に切り詰められます。
    #[cfg(any(test, feature = "random"))]
    pub fn random_within_using<R: Rng>(rng: &mut R, steps: RangeInclusive<u8>) -> Self {
        let end = (*steps.end()).clamp(1, STEP_MAX);
        let start = (*steps.start()).clamp(1, end);
        let step = rng.random_range(start..=end);
        GeoHash {
            bits: rng.random::<u64>() & cell_mask(step),
            step,
        }
    }

    #[cfg(test)]
    pub fn arb() -> impl Strategy<Value = Self> {
        Self::arb_within(1..=STEP_MAX)
    }

    #[cfg(test)]
    pub fn arb_within(steps: RangeInclusive<u8>) -> impl Strategy<Value = Self> {
        steps.prop_flat_map(|step| {
            (Just(step), any::<u64>()).prop_map(|(step, bits)| GeoHash {
                bits: bits & cell_mask(step),
                step,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geohash::{interleave::deinterleave64, range::CoordinateSystem};

    #[test]
    fn encode_known_vector() {
        let hash = CoordinateSystem::Wgs84
            .encode(40.7126674, -74.0131594, 26)
            .unwrap();
        assert_eq!(hash.bits(), 1791873972053022);
        assert_eq!(hash.step(), 26);
    }

    #[test]
    fn encode_quadrants() {
        let ranges = CoordinateSystem::Wgs84.ranges();
        // 緯度 → 偶数ビット、経度 → 奇数ビット
        let sw = GeoHash::encode(&ranges, -10.0, -10.0, 1).unwrap();
        let nw = GeoHash::encode(&ranges, 10.0, -10.0, 1).unwrap();
        let se = GeoHash::encode(&ranges, -10.0, 10.0, 1).unwrap();
        let ne = GeoHash::encode(&ranges, 10.0, 10.0, 1).unwrap();
        assert_eq!(
            [sw.bits(), nw.bits(), se.bits(), ne.bits()],
            [0b00, 0b01, 0b10, 0b11]
        );
        assert_eq!(GeoHash::encode(&ranges, 0.0, 0.0, 2).unwrap().bits(), 12);
    }

    #[test]
    fn encode_truncates() {
        // 0.75セル分の位置は切り上げずにセル0に入る
        let ranges = CoordRanges::new(
            CoordinateRange::new(0.0, 4.0),
            CoordinateRange::new(0.0, 4.0),
        );
        let hash = GeoHash::encode(&ranges, 0.75, 2.99, 2).unwrap();
        assert_eq!(deinterleave64(hash.bits()), (0, 2));
    }

    #[test]
    fn encode_inclusive_bounds() {
        let ranges = CoordinateSystem::Wgs84.ranges();
        for step in [1u8, 26, 32] {
            let max = GeoHash::encode(&ranges, 85.05112878, 180.0, step).unwrap();
            assert_eq!(max.bits(), cell_mask(step));
            let min = GeoHash::encode(&ranges, -85.05112878, -180.0, step).unwrap();
            assert_eq!(min.bits(), 0);
        }
    }

    #[test]
    fn encode_rejects_step() {
        let ranges = CoordinateSystem::Wgs84.ranges();
        assert_eq!(
            GeoHash::encode(&ranges, 0.0, 0.0, 0),
            Err(Error::StepOutOfRange { step: 0 })
        );
        assert_eq!(
            GeoHash::encode(&ranges, 0.0, 0.0, 33),
            Err(Error::StepOutOfRange { step: 33 })
        );
    }

    #[test]
    fn encode_rejects_coordinates() {
        let ranges = CoordinateSystem::Wgs84.ranges();
        let err = GeoHash::encode(&ranges, 86.0, 0.0, 26).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(
            GeoHash::encode(&ranges, 0.0, -180.5, 26),
            Err(Error::LongitudeOutOfRange { longitude: -180.5 })
        );
        assert!(GeoHash::encode(&ranges, f64::NAN, 0.0, 26).is_err());
        assert!(GeoHash::encode(&ranges, 0.0, f64::INFINITY, 26).is_err());
    }

    #[test]
    fn encode_rejects_degenerate_range() {
        let ranges = CoordRanges::new(
            CoordinateRange::new(5.0, 5.0),
            CoordinateRange::new(-180.0, 180.0),
        );
        assert_eq!(
            GeoHash::encode(&ranges, 5.0, 0.0, 10),
            Err(Error::DegenerateRange { min: 5.0, max: 5.0 })
        );
    }

    #[test]
    fn encode_rejects_invalid_range() {
        let lon = CoordinateRange::new(-180.0, 180.0);
        let invalid = [
            CoordinateRange::new(f64::NEG_INFINITY, f64::INFINITY),
            CoordinateRange::new(f64::NAN, 90.0),
            CoordinateRange::new(90.0, -90.0),
        ];
        for lat in invalid {
            let result = GeoHash::encode(&CoordRanges::new(lat, lon), 10.0, 10.0, 10);
            assert!(matches!(result, Err(Error::DegenerateRange { .. })));
            let result = GeoHash::encode(&CoordRanges::new(lon, lat), 10.0, 10.0, 10);
            assert!(matches!(result, Err(Error::DegenerateRange { .. })));
        }
    }

    #[test]
    fn mercator_encode() {
        let origin = CoordinateSystem::Mercator.encode(0.0, 0.0, 1).unwrap();
        assert_eq!(origin.bits(), 0b11);
        assert!(
            CoordinateSystem::Mercator
                .encode(20037726.38, 0.0, 1)
                .is_err()
        );
    }

    #[test]
    fn new_validation() {
        assert!(GeoHash::new(u64::MAX, 32).is_ok());
        assert!(GeoHash::new(0, 1).is_ok());
        assert_eq!(
            GeoHash::new(4, 1),
            Err(Error::BitsOutOfRange { bits: 4, step: 1 })
        );
        assert_eq!(GeoHash::new(0, 0), Err(Error::StepOutOfRange { step: 0 }));
    }

    #[test]
    fn parent_children() {
        let hash = GeoHash::new(0b10_11_01, 3).unwrap();
        for child in hash.children().unwrap() {
            assert_eq!(child.parent(1), Some(hash));
            assert!(hash.contains(&child));
        }
        assert_eq!(hash.parent(0), Some(hash));
        assert!(hash.contains(&hash));
        assert!(!hash.children().unwrap()[0].contains(&hash));

        let full = GeoHash::new(0, 32).unwrap();
        assert_eq!(
            full.children(),
            Err(Error::StepOutOfRange { step: 33 })
        );
    }

    #[test]
    fn random_is_valid() {
        for _ in 0..100 {
            let hash = GeoHash::random_within(0..=40);
            assert!(GeoHash::new(hash.bits(), hash.step()).is_ok());
        }
    }
}
