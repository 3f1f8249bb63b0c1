/// 本ライブラリで扱うことができる最大のステップ（1軸あたりのビット数）
//2つのu32をu64にインターリーブするため32が上限
pub const STEP_MAX: u8 = 32;

/// ホスト側がソート済み集合のスコアとして保存する標準のステップ。
///
/// 26 × 2 = 52ビットとなり、f64の仮数部に誤差なく収まる。
pub const STEP_DEFAULT: u8 = 26;

/// WGS84で符号化できる緯度の上限。
//EPSG:900913 / EPSG:3785 の制約。極はメルカトル図法で表現できない
pub const WGS84_LAT_MAX: f64 = 85.05112878;

/// WGS84で符号化できる緯度の下限。
pub const WGS84_LAT_MIN: f64 = -WGS84_LAT_MAX;

/// WGS84で符号化できる経度の上限。
pub const WGS84_LON_MAX: f64 = 180.0;

/// WGS84で符号化できる経度の下限。
pub const WGS84_LON_MIN: f64 = -WGS84_LON_MAX;

/// メルカトル平面座標の上限（地球の投影後の周長の半分）。
pub const MERCATOR_MAX: f64 = 20037726.37;

/// メルカトル平面座標の下限。
pub const MERCATOR_MIN: f64 = -MERCATOR_MAX;

/// 偶数ビット（緯度 / Y平面）を取り出すマスク。
pub const LAT_BITS: u64 = 0x5555_5555_5555_5555;

/// 奇数ビット（経度 / X平面）を取り出すマスク。
pub const LON_BITS: u64 = 0xAAAA_AAAA_AAAA_AAAA;
