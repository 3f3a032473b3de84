// src/math/integrator.rs

/// かごの運動状態 (位置と速度)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub position: f64,
    pub velocity: f64,
}

/// 半陰的 (シンプレクティック) Euler法による積分
///
/// 固定刻み `dt` で一回だけ進める。サブステップや刻み幅の適応はしないため、
/// 精度は `dt` の選択で決まる。
///
/// # 引数
/// - `state`: 現在の位置と速度
/// - `acceleration`: この刻みで用いる加速度
/// - `dt`: 時間刻み
///
/// # 戻り値
/// - 更新後の位置と速度。位置の更新には更新後の速度を用いる
pub fn semi_implicit_euler(state: Kinematics, acceleration: f64, dt: f64) -> Kinematics {
    let velocity = state.velocity + acceleration * dt;
    let position = state.position + velocity * dt;
    Kinematics { position, velocity }
}

/// 釣合いおもりの位置
///
/// かご位置との和は常にケーブル長 `run_length` に等しい。
pub fn counterweight_position(run_length: f64, cabin_position: f64) -> f64 {
    run_length - cabin_position
}
