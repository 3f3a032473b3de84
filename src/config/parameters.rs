// src/config/parameters.rs

use crate::config::error::InvalidConfigError;
use crate::config::scenario::ControlConstants;

/// モータ定格 (motor_other.csv)
#[derive(Debug, Clone, PartialEq)]
pub struct MotorRatings {
    pub power: f64,              // 定格出力 (W)
    pub stator_resistance: f64,  // 固定子抵抗の推定値 (Ω)
    pub max_acceleration: f64,   // 最大加速度 (m/s²)
    pub min_acceleration: f64,   // 最小加速度 (m/s²)
    pub max_velocity: f64,       // 最大速度 (m/s)
    pub pulley_diameter: f64,    // プーリ直径 (m)、CSVではmm
}

/// エレベータ機械パラメータ (elevator_params.csv)
#[derive(Debug, Clone, PartialEq)]
pub struct ElevatorParameters {
    pub cage_mass: f64,          // かご質量 (kg)
    pub carrying_capacity: f64,  // 積載量 (kg)
    pub counterweight_mass: f64, // 釣合いおもり質量 (kg)
}

/// シミュレーション全体の不変な設定
///
/// 起動時に一度だけ構築され、以後変更されない。
/// 構築時に検証を行うため、ループ中にゼロ除算などは起こらない。
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub motor: MotorRatings,
    pub elevator: ElevatorParameters,
    pub constants: ControlConstants,
    pub cabin_mass: f64,    // かご質量 + 乗客荷重 (kg)
    pub pulley_radius: f64, // (m)
    pub total_inertia: f64, // モータ + プーリの慣性モーメント (kg·m²)
}

impl SimulationConfig {
    /// 三つのパラメータ群から設定を構築する
    ///
    /// # 戻り値
    /// - 検証済みの設定。非物理的な値があれば `InvalidConfigError`
    pub fn new(
        motor: MotorRatings,
        elevator: ElevatorParameters,
        constants: ControlConstants,
    ) -> Result<Self, InvalidConfigError> {
        validate(&motor, &elevator, &constants)?;

        let cabin_mass = elevator.cage_mass + constants.passenger_load;
        let pulley_radius = motor.pulley_diameter / 2.0;
        let pulley_inertia = 0.5 * constants.pulley_mass * pulley_radius.powi(2);
        let total_inertia = constants.motor_inertia + pulley_inertia;

        Ok(Self {
            motor,
            elevator,
            constants,
            cabin_mass,
            pulley_radius,
            total_inertia,
        })
    }

    pub fn max_acceleration(&self) -> f64 {
        self.motor.max_acceleration
    }

    pub fn dt(&self) -> f64 {
        self.constants.dt
    }

    /// 乗客荷重が積載量を超えているか
    pub fn is_overloaded(&self) -> bool {
        self.constants.passenger_load > self.elevator.carrying_capacity
    }
}

fn validate(
    motor: &MotorRatings,
    elevator: &ElevatorParameters,
    constants: &ControlConstants,
) -> Result<(), InvalidConfigError> {
    let finite = [
        ("Pmotor", motor.power),
        ("Rs_pred", motor.stator_resistance),
        ("max_a", motor.max_acceleration),
        ("min_a", motor.min_acceleration),
        ("max_v", motor.max_velocity),
        ("pulley_dia", motor.pulley_diameter),
        ("cage_mass", elevator.cage_mass),
        ("carrying_capacity", elevator.carrying_capacity),
        ("counterweight_mass", elevator.counterweight_mass),
        ("initial_height", constants.initial_height),
        ("target_height", constants.target_height),
        ("passenger_load", constants.passenger_load),
        ("gravity", constants.gravity),
        ("dt", constants.dt),
        ("max_time", constants.max_time),
        ("kp", constants.kp),
        ("ki", constants.ki),
        ("kd", constants.kd),
        ("motor_inertia", constants.motor_inertia),
        ("pulley_mass", constants.pulley_mass),
        ("air_coefficient", constants.air_coefficient),
        ("cable_stiffness", constants.cable_stiffness),
        ("cable_run_length", constants.cable_run_length),
        ("divergence_position_bound", constants.divergence_position_bound),
        ("divergence_velocity_bound", constants.divergence_velocity_bound),
    ];
    if let Some(&(name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
        return Err(InvalidConfigError::NotFinite { name, value });
    }

    let positive = [
        ("pulley_dia", motor.pulley_diameter),
        ("dt", constants.dt),
        ("max_a", motor.max_acceleration),
        ("divergence_position_bound", constants.divergence_position_bound),
        ("divergence_velocity_bound", constants.divergence_velocity_bound),
    ];
    if let Some(&(name, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
        return Err(InvalidConfigError::NotPositive { name, value });
    }

    if constants.max_time < 0.0 {
        return Err(InvalidConfigError::Negative {
            name: "max_time",
            value: constants.max_time,
        });
    }

    Ok(())
}
