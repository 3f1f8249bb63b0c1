use serde::Serialize;

use crate::{
    error::Error,
    geohash::{
        hash::GeoHash,
        interleave::deinterleave64,
        range::{CoordRanges, CoordinateRange},
    },
};

/// [`GeoHash`] が表すセル（矩形領域）。
///
/// 復号によってのみ得られる。ハッシュは点ではなくセルを表すため、
/// 復号の結果は常にこの矩形となる。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoBox {
    hash: GeoHash,
    latitude: CoordinateRange,
    longitude: CoordinateRange,
}

impl GeoBox {
    /// 復号元の [`GeoHash`] を返す。
    pub fn hash(&self) -> GeoHash {
        self.hash
    }

    pub fn latitude(&self) -> CoordinateRange {
        self.latitude
    }

    pub fn longitude(&self) -> CoordinateRange {
        self.longitude
    }

    /// セルの中心点 `(latitude, longitude)` を返す。
    ///
    /// ```
    /// # use geohash_logic::CoordinateSystem;
    /// let hash = CoordinateSystem::Wgs84.encode(40.7126674, -74.0131594, 26).unwrap();
    /// let (lat, lon) = CoordinateSystem::Wgs84.decode(hash).unwrap().center();
    /// assert!((lat - 40.7126674).abs() < 1e-5);
    /// assert!((lon - -74.0131594).abs() < 1e-5);
    /// ```
    pub fn center(&self) -> (f64, f64) {
        (self.latitude.center(), self.longitude.center())
    }

    /// 両端を含めて座標がセル内にあるかを返す。
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.latitude.contains(latitude) && self.longitude.contains(longitude)
    }
}

/// 固定小数点値 `index` のセルが軸上で占める区間。
fn cell_range(range: &CoordinateRange, index: u32, step: u8) -> CoordinateRange {
    let cells = (1u64 << step) as f64;
    let width = range.length();
    //index + 1 は step = 32 で u32 に収まらない
    CoordinateRange::new(
        range.min + (index as f64 / cells) * width,
        range.min + ((index as u64 + 1) as f64 / cells) * width,
    )
}

impl GeoHash {
    /// このハッシュを `ranges` の値域で復号し、セルの矩形を返します。
    ///
    /// # バリデーション
    /// - `bits == 0` の場合、未初期化の値として [`Error::ZeroHash`] を返します。
    ///   南西端のセルもビット列が0になるため、同様に復号できません。
    /// - 値域が有限かつ `min < max` でない場合、[`Error::DegenerateRange`] を返します。
    ///
    /// ```
    /// # use geohash_logic::{CoordinateSystem, Error, GeoHash};
    /// let ranges = CoordinateSystem::Wgs84.ranges();
    /// let hash = GeoHash::encode(&ranges, 0.0, 0.0, 1).unwrap();
    /// let area = hash.decode(&ranges).unwrap();
    /// assert_eq!(area.latitude().min, 0.0);
    /// assert_eq!(area.longitude().max, 180.0);
    ///
    /// let zero = GeoHash::new(0, 26).unwrap();
    /// assert_eq!(zero.decode(&ranges), Err(Error::ZeroHash));
    /// ```
    pub fn decode(self, ranges: &CoordRanges) -> Result<GeoBox, Error> {
        if self.is_zero() {
            tracing::debug!(step = self.step(), "zero hash rejected");
            return Err(Error::ZeroHash);
        }
        ranges.latitude.check()?;
        ranges.longitude.check()?;

        let (lat, lon) = deinterleave64(self.bits());

        Ok(GeoBox {
            hash: self,
            latitude: cell_range(&ranges.latitude, lat, self.step()),
            longitude: cell_range(&ranges.longitude, lon, self.step()),
        })
    }

    /// 復号したセルの中心点 `(latitude, longitude)` を返します。
    pub fn decode_to_point(self, ranges: &CoordRanges) -> Result<(f64, f64), Error> {
        self.decode(ranges).map(|area| area.center())
    }
}
