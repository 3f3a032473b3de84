// src/simulation/framework.rs

use std::fmt;

use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::math::{counterweight_position, saturate, semi_implicit_euler};
use crate::models::{
    accumulate_energy, apply_brake, pid_update, solve_motor_load, EnergyTotals, PidGains,
    PidState,
};
use crate::simulation::error::{NumericInstability, SimulationError};
use crate::simulation::pacing::Pacer;
use crate::simulation::report::{ReportCadence, ReportSink, StepReport};
use crate::simulation::{SimulationState, StepResult};

/// 目標到達とみなす位置・速度の許容値
pub const ARRIVAL_TOLERANCE: f64 = 0.01;

/// シミュレーションの状態遷移
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    Running,
    Finished(Termination),
}

/// 終了状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    TargetReached,
    TimeExpired,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::TargetReached => write!(f, "target reached"),
            Termination::TimeExpired => write!(f, "time expired"),
        }
    }
}

/// 実行結果のまとめ
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub termination: Termination,
    pub final_state: SimulationState,
    pub steps: u64,
    pub peak_torque: f64,   // |モータトルク| の最大値 (N·m)
    pub peak_velocity: f64, // |かご速度| の最大値 (m/s)
    pub instability: Option<NumericInstability>,
}

/// シミュレーションステートの初期化
pub fn initialize_simulation_state(config: &SimulationConfig) -> SimulationState {
    let position = config.constants.initial_height;
    SimulationState {
        step: 0,
        time: 0.0,
        position,
        velocity: 0.0,
        acceleration: 0.0,
        counterweight_position: counterweight_position(
            config.constants.cable_run_length,
            position,
        ),
        pid: PidState::default(),
        energy: EnergyTotals::default(),
    }
}

/// シミュレーションステップの実行
///
/// PID → 飽和 → 力学 → 積分 → ブレーキ → エネルギーの順に一刻み進める。
/// 入力の状態は変更せず、新しい状態とこの刻みの計算結果を返す。
pub fn execute_simulation_step(
    state: &SimulationState,
    config: &SimulationConfig,
) -> (SimulationState, StepResult) {
    let dt = config.dt();
    let max_acceleration = config.max_acceleration();

    // PID制御による目標加速度
    let (pid, raw_acceleration) = pid_update(
        &PidGains::from_config(config),
        state.pid,
        config.constants.target_height,
        state.position,
        dt,
    );

    // 目標加速度の制限
    let desired_acceleration = saturate(raw_acceleration, max_acceleration);

    // 力・トルク・電力 (積分前の速度で評価)
    let load = solve_motor_load(config, state.velocity, desired_acceleration);

    // 速度と位置の更新
    let kinematics = semi_implicit_euler(state.kinematics(), desired_acceleration, dt);

    // 機械ブレーキ (二段目の制限)
    let brake = apply_brake(desired_acceleration, max_acceleration, config.cabin_mass);

    let energy = accumulate_energy(state.energy, load.power, dt);

    let step = state.step + 1;
    let next = SimulationState {
        step,
        time: step as f64 * dt,
        position: kinematics.position,
        velocity: kinematics.velocity,
        acceleration: brake.acceleration,
        counterweight_position: counterweight_position(
            config.constants.cable_run_length,
            kinematics.position,
        ),
        pid,
        energy,
    };
    let result = StepResult {
        desired_acceleration,
        load,
        brake,
    };
    (next, result)
}

/// かごが目標高さで静止しているか
pub fn target_reached(state: &SimulationState, config: &SimulationConfig) -> bool {
    (state.position - config.constants.target_height).abs() < ARRIVAL_TOLERANCE
        && state.velocity.abs() < ARRIVAL_TOLERANCE
}

/// 刻み後の状態から次の状態遷移を判定する
pub fn evaluate_status(state: &SimulationState, config: &SimulationConfig) -> SimulationStatus {
    if target_reached(state, config) {
        SimulationStatus::Finished(Termination::TargetReached)
    } else if state.time >= config.constants.max_time {
        SimulationStatus::Finished(Termination::TimeExpired)
    } else {
        SimulationStatus::Running
    }
}

/// 位置または速度が発散していないかを調べる
pub fn detect_instability(
    state: &SimulationState,
    config: &SimulationConfig,
) -> Option<NumericInstability> {
    let diverged = !state.position.is_finite()
        || !state.velocity.is_finite()
        || state.position.abs() > config.constants.divergence_position_bound
        || state.velocity.abs() > config.constants.divergence_velocity_bound;

    diverged.then(|| NumericInstability {
        time: state.time,
        position: state.position,
        velocity: state.velocity,
    })
}

/// シミュレーションのメインループ
///
/// 終了状態 (目標到達または時間切れ) に達するまで刻みを進め、
/// `cadence` に従って `sink` へ報告する。`pacer` は刻みの間で呼ばれるだけで、
/// 計算結果には影響しない。
pub fn run_simulation(
    config: &SimulationConfig,
    cadence: ReportCadence,
    sink: &mut dyn ReportSink,
    pacer: &mut dyn Pacer,
) -> Result<RunSummary, SimulationError> {
    let mut state = initialize_simulation_state(config);
    let mut peak_torque: f64 = 0.0;
    let mut peak_velocity: f64 = 0.0;
    let mut instability = None;

    info!(
        target_height = config.constants.target_height,
        max_time = config.constants.max_time,
        dt = config.dt(),
        "simulation started"
    );

    let mut status = if state.time >= config.constants.max_time {
        SimulationStatus::Finished(Termination::TimeExpired)
    } else {
        SimulationStatus::Running
    };

    let termination = loop {
        if let SimulationStatus::Finished(termination) = status {
            break termination;
        }

        let (next, result) = execute_simulation_step(&state, config);
        debug!(
            time = next.time,
            position = next.position,
            velocity = next.velocity,
            acceleration = next.acceleration,
            power = result.load.power,
            "step"
        );

        peak_torque = peak_torque.max(result.load.motor_torque.abs());
        peak_velocity = peak_velocity.max(next.velocity.abs());

        if instability.is_none() {
            if let Some(found) = detect_instability(&next, config) {
                warn!("{}", found);
                instability = Some(found);
            }
        }

        if cadence.should_report(state.time, next.time) {
            sink.report(&StepReport {
                state: &next,
                result: &result,
            })?;
        }

        pacer.pace(next.time);
        state = next;
        status = evaluate_status(&state, config);
    };

    let summary = RunSummary {
        termination,
        final_state: state,
        steps: state.step,
        peak_torque,
        peak_velocity,
        instability,
    };
    info!(
        %termination,
        time = state.time,
        position = state.position,
        energy_consumed = state.energy.consumed,
        energy_generated = state.energy.generated,
        "simulation finished"
    );
    sink.finish(&summary)?;
    Ok(summary)
}
