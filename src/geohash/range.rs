use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    geohash::{
        area::GeoBox,
        constants::{
            MERCATOR_MAX, MERCATOR_MIN, WGS84_LAT_MAX, WGS84_LAT_MIN, WGS84_LON_MAX,
            WGS84_LON_MIN,
        },
        hash::GeoHash,
    },
};

/// 1つの軸の値域 `[min, max]` を表す型。
///
/// 座標系ごとの定数から作られ、変更されることはない。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRange {
    pub min: f64,
    pub max: f64,
}

impl CoordinateRange {
    /// 検証を行わずに値域を作る。有限かつ `min < max` でない値域は符号化・復号の段階で拒否される。
    pub const fn new(min: f64, max: f64) -> CoordinateRange {
        CoordinateRange { min, max }
    }

    /// 幅が0（`min == max`）の縮退した値域かどうか。
    pub fn is_zero(&self) -> bool {
        self.min == self.max
    }

    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// 両端を含めて `value` が値域内にあるかを返す。NaNは常に範囲外。
    ///
    /// ```
    /// # use geohash_logic::CoordinateRange;
    /// let range = CoordinateRange::new(-180.0, 180.0);
    /// assert!(range.contains(180.0));
    /// assert!(!range.contains(180.5));
    /// assert!(!range.contains(f64::NAN));
    /// ```
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// 有限かつ `min < max` を満たす値域かどうか。NaN・無限大・逆順の値域は不正。
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    pub(crate) fn check(&self) -> Result<(), Error> {
        if !self.is_valid() {
            tracing::debug!(min = self.min, max = self.max, "degenerate coordinate range");
            return Err(Error::DegenerateRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// 緯度軸と経度軸の値域の組。
///
/// 符号化・復号はこの解決済みの値を受け取り、座標系タグで分岐しない。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordRanges {
    pub latitude: CoordinateRange,
    pub longitude: CoordinateRange,
}

impl CoordRanges {
    pub const fn new(latitude: CoordinateRange, longitude: CoordinateRange) -> CoordRanges {
        CoordRanges {
            latitude,
            longitude,
        }
    }
}

/// 座標系を選択するEnum
///
/// u8のタグに変換される。新しい座標系は値域の定数とともにここへ追加する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CoordinateSystem {
    /// 緯度経度（度）。緯度はWebメルカトルの限界 ±85.05112878 に制限される。
    Wgs84 = 1,
    /// メルカトル投影後の平面座標（メートル）。
    Mercator = 2,
}

const WGS84_RANGES: CoordRanges = CoordRanges::new(
    CoordinateRange::new(WGS84_LAT_MIN, WGS84_LAT_MAX),
    CoordinateRange::new(WGS84_LON_MIN, WGS84_LON_MAX),
);

const MERCATOR_RANGES: CoordRanges = CoordRanges::new(
    CoordinateRange::new(MERCATOR_MIN, MERCATOR_MAX),
    CoordinateRange::new(MERCATOR_MIN, MERCATOR_MAX),
);

impl CoordinateSystem {
    /// この座標系の緯度・経度（Y・X）の値域を返す。
    ///
    /// ```
    /// # use geohash_logic::CoordinateSystem;
    /// let ranges = CoordinateSystem::Wgs84.ranges();
    /// assert_eq!(ranges.latitude.max, 85.05112878);
    /// assert_eq!(ranges.longitude.min, -180.0);
    /// ```
    pub const fn ranges(self) -> CoordRanges {
        match self {
            CoordinateSystem::Wgs84 => WGS84_RANGES,
            CoordinateSystem::Mercator => MERCATOR_RANGES,
        }
    }

    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// この座標系の値域で [`GeoHash::encode`] を行う。
    ///
    /// ```
    /// # use geohash_logic::CoordinateSystem;
    /// let hash = CoordinateSystem::Wgs84.encode(40.7126674, -74.0131594, 26).unwrap();
    /// assert_eq!(hash.bits(), 1791873972053022);
    /// ```
    pub fn encode(self, latitude: f64, longitude: f64, step: u8) -> Result<GeoHash, Error> {
        GeoHash::encode(&self.ranges(), latitude, longitude, step)
    }

    /// この座標系の値域で [`GeoHash::decode`] を行う。
    pub fn decode(self, hash: GeoHash) -> Result<GeoBox, Error> {
        hash.decode(&self.ranges())
    }

    /// この座標系の値域で復号し、セルの中心点 `(latitude, longitude)` を返す。
    pub fn decode_to_point(self, hash: GeoHash) -> Result<(f64, f64), Error> {
        hash.decode_to_point(&self.ranges())
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateSystem::Wgs84 => write!(f, "wgs84"),
            CoordinateSystem::Mercator => write!(f, "mercator"),
        }
    }
}

impl TryFrom<u8> for CoordinateSystem {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(CoordinateSystem::Wgs84),
            2 => Ok(CoordinateSystem::Mercator),
            _ => {
                tracing::debug!(tag, "unknown coordinate system tag");
                Err(Error::NotSupported { tag })
            }
        }
    }
}

impl FromStr for CoordinateSystem {
    type Err = Error;

    /// ```
    /// # use geohash_logic::CoordinateSystem;
    /// assert_eq!("WGS84".parse::<CoordinateSystem>(), Ok(CoordinateSystem::Wgs84));
    /// assert!("utm".parse::<CoordinateSystem>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wgs84" => Ok(CoordinateSystem::Wgs84),
            "mercator" => Ok(CoordinateSystem::Mercator),
            _ => {
                tracing::debug!(name = s, "unknown coordinate system name");
                Err(Error::NotSupportedName {
                    name: s.to_string(),
                })
            }
        }
    }
}

/// 生のタグから値域を解決する。未知のタグに既定値を当てはめることはしない。
///
/// ```
/// # use geohash_logic::{coord_ranges, Error};
/// let ranges = coord_ranges(2).unwrap();
/// assert_eq!(ranges.latitude.max, 20037726.37);
/// assert_eq!(coord_ranges(0), Err(Error::NotSupported { tag: 0 }));
/// ```
pub fn coord_ranges(tag: u8) -> Result<CoordRanges, Error> {
    CoordinateSystem::try_from(tag).map(CoordinateSystem::ranges)
}
