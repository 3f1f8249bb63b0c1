use serde::{Deserialize, Serialize};
use thiserror::Error;

/// このクレートで発生し得るすべてのエラー。
///
/// 大きく分けて、未対応の座標系を指定した場合（[`Error::is_not_supported`]）と、
/// 入力値が不正な場合（[`Error::is_invalid_input`]）の2種類がある。
/// どちらも純粋な計算上の失敗であり、再試行で解消することはない。
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum Error {
    #[error("Coordinate system tag '{tag}' is not supported")]
    NotSupported { tag: u8 },

    #[error("Coordinate system '{name}' is not supported")]
    NotSupportedName { name: String },

    #[error("Step '{step}' is out of range (valid: 1..=32)")]
    StepOutOfRange { step: u8 },

    #[error("Bits '{bits:#x}' do not fit in step '{step}'")]
    BitsOutOfRange { bits: u64, step: u8 },

    #[error("Coordinate range [{min}, {max}] is degenerate")]
    DegenerateRange { min: f64, max: f64 },

    #[error("Latitude '{latitude}' is out of range")]
    LatitudeOutOfRange { latitude: f64 },

    #[error("Longitude '{longitude}' is out of range")]
    LongitudeOutOfRange { longitude: f64 },

    #[error("Zero hash cannot be decoded")]
    ZeroHash,
}

impl Error {
    /// 座標系の指定が未対応であることによるエラーかどうか。
    pub fn is_not_supported(&self) -> bool {
        matches!(
            self,
            Error::NotSupported { .. } | Error::NotSupportedName { .. }
        )
    }

    /// 入力値の不正によるエラーかどうか。
    pub fn is_invalid_input(&self) -> bool {
        !self.is_not_supported()
    }
}
