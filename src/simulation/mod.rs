// src/simulation/mod.rs

pub mod csv;
pub mod error;
pub mod framework;
pub mod load_parameters;
pub mod pacing;
pub mod report;

use crate::math::Kinematics;
use crate::models::{BrakeOutcome, EnergyTotals, MotorLoad, PidState};

/// シミュレーションの全体状態を表す構造体
///
/// ドライバが唯一の所有者であり、一刻みごとに新しい値へ置き換えられる。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub step: u64,                   // 実行済みの刻み数
    pub time: f64,                   // 経過時間 (s) = step * dt
    pub position: f64,               // かご位置 (m)
    pub velocity: f64,               // かご速度 (m/s)
    pub acceleration: f64,           // かご加速度 (m/s²)
    pub counterweight_position: f64, // 釣合いおもり位置 (m)
    pub pid: PidState,
    pub energy: EnergyTotals,
}

impl SimulationState {
    pub fn kinematics(&self) -> Kinematics {
        Kinematics {
            position: self.position,
            velocity: self.velocity,
        }
    }
}

/// 一刻みの計算結果。次の刻みには持ち越さない
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub desired_acceleration: f64, // 飽和処理後の目標加速度 (m/s²)
    pub load: MotorLoad,
    pub brake: BrakeOutcome,
}
