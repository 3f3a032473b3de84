// src/config/scenario.rs

use serde::Deserialize;

/// シミュレーション・制御定数
///
/// シナリオYAMLで上書きできる。記述されなかった項目は既定値を使う。
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ControlConstants {
    pub initial_height: f64, // 初期かご位置 (m)
    pub target_height: f64,  // 目標高さ (m)
    pub passenger_load: f64, // 乗客荷重 (kg)
    pub gravity: f64,        // 重力加速度 (m/s²)
    pub dt: f64,             // 時間刻み (s)
    pub max_time: f64,       // 最大シミュレーション時間 (s)
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub motor_inertia: f64,    // モータ慣性モーメント (kg·m²)
    pub pulley_mass: f64,      // プーリ質量 (kg)
    pub air_coefficient: f64,  // 空気抵抗係数 (kg/s)
    pub cable_stiffness: f64,  // ケーブル剛性 (N/m)、動力学には未使用
    pub cable_run_length: f64, // かご位置 + 釣合いおもり位置 (m)
    pub divergence_position_bound: f64, // 発散とみなす位置の絶対値 (m)
    pub divergence_velocity_bound: f64, // 発散とみなす速度の絶対値 (m/s)
}

impl Default for ControlConstants {
    fn default() -> Self {
        Self {
            initial_height: 0.0,
            target_height: 30.0,
            passenger_load: 500.0,
            gravity: 9.81,
            dt: 1.0,
            max_time: 50.0,
            kp: 2.0,
            ki: 0.015,
            kd: 5.0,
            motor_inertia: 10.0,
            pulley_mass: 100.0,
            air_coefficient: 0.5,
            cable_stiffness: 1e6,
            cable_run_length: 50.0,
            divergence_position_bound: 1e4,
            divergence_velocity_bound: 1e3,
        }
    }
}
