/// 発生し得るすべてのエラーを`enum` 型として定義・集約。
mod error;

/// 整数ジオハッシュの符号化・復号・隣接セルの計算。
mod geohash;

pub use error::Error;
pub use geohash::{
    area::GeoBox,
    constants::{
        MERCATOR_MAX, MERCATOR_MIN, STEP_DEFAULT, STEP_MAX, WGS84_LAT_MAX, WGS84_LAT_MIN,
        WGS84_LON_MAX, WGS84_LON_MIN,
    },
    hash::GeoHash,
    interleave::{deinterleave64, interleave64},
    neighbors::{Direction, Neighbors},
    range::{CoordRanges, CoordinateRange, CoordinateSystem, coord_ranges},
};
