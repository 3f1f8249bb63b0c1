//! 座標と整数ジオハッシュの相互変換、および隣接セルの計算。
//!
//! データの流れは一方向で、符号化は
//! 座標 → 値域の解決 → 固定小数点化 → インターリーブ → ハッシュ、
//! 復号はその逆順となる。隣接セルの計算は座標を経由せずハッシュ上で完結する。

pub mod constants;

//値域の解決
pub mod range;

pub(crate) mod interleave;

//符号化と階層操作
pub mod hash;

//復号
pub mod area;

pub mod neighbors;

#[cfg(test)]
mod tests;
