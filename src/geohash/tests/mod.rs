use crate::{CoordRanges, CoordinateRange, CoordinateSystem, GeoHash};

#[cfg(any(test))]
use proptest::prelude::*;


///浮動小数点の丸め誤差を許容して、値が値域内にあるかを判定する
/// テスト以外では使用しないため、ここに定義
#[cfg(any(test))]
pub fn roughly_contains(range: &CoordinateRange, value: f64) -> bool {
    let tolerance = 4.0 * f64::EPSILON * range.min.abs().max(range.max.abs());
    range.min - tolerance <= value && value <= range.max + tolerance
}

///セルの1辺の長さ（緯度方向、経度方向）を返す
#[cfg(any(test))]
pub fn cell_size(ranges: &CoordRanges, step: u8) -> (f64, f64) {
    let cells = (1u64 << step) as f64;
    (
        ranges.latitude.length() / cells,
        ranges.longitude.length() / cells,
    )
}

///座標系と、その値域内のランダムな座標を生成する
#[cfg(any(test))]
pub fn arb_point() -> impl Strategy<Value = (CoordinateSystem, f64, f64)> {
    prop_oneof![Just(CoordinateSystem::Wgs84), Just(CoordinateSystem::Mercator)].prop_flat_map(
        |system| {
            let ranges = system.ranges();
            (
                Just(system),
                ranges.latitude.min..=ranges.latitude.max,
                ranges.longitude.min..=ranges.longitude.max,
            )
        },
    )
}

///グリッドの端に接していないセルだけを生成する
/// 端のセルでは隣接セルが循環するため、座標を経由した計算と一致しない
#[cfg(any(test))]
pub fn arb_inner_hash(steps: std::ops::RangeInclusive<u8>) -> impl Strategy<Value = GeoHash> {
    GeoHash::arb_within(steps).prop_filter("cell must not touch the grid edge", |hash| {
        let (lat, lon) = crate::deinterleave64(hash.bits());
        let last = ((1u64 << hash.step()) - 1) as u32;
        lat > 0 && lat < last && lon > 0 && lon < last
    })
}
