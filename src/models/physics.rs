// src/models/physics.rs

use std::fmt;

use crate::config::SimulationConfig;

/// モータの運転モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorMode {
    /// 力行 (電力を消費)
    Traction,
    /// 回生 (電力を返す)
    Regenerative,
}

impl MotorMode {
    /// 電力の符号から運転モードを決める。ちょうど 0 (負のゼロを含む) は力行
    pub fn from_power(power: f64) -> Self {
        if power >= 0.0 {
            MotorMode::Traction
        } else {
            MotorMode::Regenerative
        }
    }
}

impl fmt::Display for MotorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorMode::Traction => write!(f, "traction"),
            MotorMode::Regenerative => write!(f, "regenerative"),
        }
    }
}

/// 一刻みぶんのモータ負荷
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorLoad {
    pub gravity_force: f64,        // (N)
    pub air_force: f64,            // (N)
    pub required_force: f64,       // (N)
    pub motor_force: f64,          // (N)
    pub motor_torque: f64,         // (N·m)
    pub angular_acceleration: f64, // (rad/s²) 状態更新には使わない
    pub motor_speed: f64,          // (rad/s)
    pub power: f64,                // (W)
    pub mode: MotorMode,
}

/// 釣合いおもりとかごの重力差を計算する純粋関数
///
/// 釣合いおもりの方が重ければ正 (かごを引き上げる向き)。
pub fn calculate_gravity_force(counterweight_mass: f64, cabin_mass: f64, gravity: f64) -> f64 {
    (counterweight_mass - cabin_mass) * gravity
}

/// 速度に比例する空気抵抗を計算する純粋関数
pub fn calculate_air_force(air_coefficient: f64, velocity: f64) -> f64 {
    air_coefficient * velocity
}

/// 目標加速度に必要な正味の力からモータが負担すべき力を計算する純粋関数
///
/// # 引数
/// - `required_force`: かご質量 × 目標加速度
/// - `gravity_force`: 重力差
/// - `air_force`: 空気抵抗
pub fn calculate_motor_force(required_force: f64, gravity_force: f64, air_force: f64) -> f64 {
    required_force - gravity_force - air_force
}

/// 目標加速度に対するモータ負荷を求める
///
/// # 引数
/// - `config`: 検証済みの設定 (プーリ半径と慣性は正)
/// - `velocity`: 現在のかご速度 (m/s)
/// - `desired_acceleration`: クランプ済みの目標加速度 (m/s²)
///
/// # 戻り値
/// - 力、トルク、回転速度、電力と運転モード
pub fn solve_motor_load(
    config: &SimulationConfig,
    velocity: f64,
    desired_acceleration: f64,
) -> MotorLoad {
    let gravity_force = calculate_gravity_force(
        config.elevator.counterweight_mass,
        config.cabin_mass,
        config.constants.gravity,
    );
    let air_force = calculate_air_force(config.constants.air_coefficient, velocity);
    let required_force = config.cabin_mass * desired_acceleration;
    let motor_force = calculate_motor_force(required_force, gravity_force, air_force);

    let motor_torque = motor_force * config.pulley_radius;
    let angular_acceleration = motor_torque / config.total_inertia;
    let motor_speed = velocity / config.pulley_radius;
    let power = motor_torque * motor_speed;

    MotorLoad {
        gravity_force,
        air_force,
        required_force,
        motor_force,
        motor_torque,
        angular_acceleration,
        motor_speed,
        power,
        mode: MotorMode::from_power(power),
    }
}
