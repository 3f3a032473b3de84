// src/math/saturation.rs

/// 対称なハードクランプ
///
/// 平滑化は行わない。`limit` の範囲内の値はそのまま返す。
///
/// # 引数
/// - `value`: 入力値
/// - `limit`: 正の上限値
///
/// # 戻り値
/// - `[-limit, +limit]` に収めた値
pub fn saturate(value: f64, limit: f64) -> f64 {
    if value > limit {
        limit
    } else if value < -limit {
        -limit
    } else {
        value
    }
}
