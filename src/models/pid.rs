// src/models/pid.rs

use crate::config::SimulationConfig;

/// PIDゲイン
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            kp: config.constants.kp,
            ki: config.constants.ki,
            kd: config.constants.kd,
        }
    }
}

/// PID制御器の記憶 (積分値と前回誤差)
///
/// 前回誤差の初期値は 0 とする。リセットやアンチワインドアップは持たない。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PidState {
    pub integral: f64,
    pub previous_error: f64,
}

/// 位置誤差から目標加速度を計算する純粋関数
///
/// # 引数
/// - `gains`: PIDゲイン
/// - `state`: 現在の制御器の記憶
/// - `target`: 目標高さ (m)
/// - `position`: 現在のかご位置 (m)
/// - `dt`: 時間刻み (s)、正であること
///
/// # 戻り値
/// - 更新後の制御器の記憶
/// - 目標加速度 (m/s²)、クランプ前
pub fn pid_update(
    gains: &PidGains,
    state: PidState,
    target: f64,
    position: f64,
    dt: f64,
) -> (PidState, f64) {
    let error = target - position;
    let integral = state.integral + error * dt;
    let derivative = (error - state.previous_error) / dt;

    let output = gains.kp * error + gains.ki * integral + gains.kd * derivative;

    let new_state = PidState {
        integral,
        previous_error: error,
    };
    (new_state, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GAINS: PidGains = PidGains {
        kp: 2.0,
        ki: 0.015,
        kd: 5.0,
    };

    /// test_pid_first_call
    /// 前回誤差 0 から誤差 30 を受けると、微分項は (30 - 0) / 1 = 30 になる。
    /// 出力は 2*30 + 0.015*30 + 5*30 = 210.45。
    #[test]
    fn test_pid_first_call() {
        let (state, output) = pid_update(&GAINS, PidState::default(), 30.0, 0.0, 1.0);

        assert_relative_eq!(output, 210.45, epsilon = 1e-9);
        assert_relative_eq!(state.integral, 30.0);
        assert_relative_eq!(state.previous_error, 30.0);
    }

    #[test]
    fn test_pid_integral_accumulates() {
        let gains = PidGains { kp: 0.0, ki: 1.0, kd: 0.0 };
        let (state, _) = pid_update(&gains, PidState::default(), 1.0, 0.0, 0.1);
        let (state, output) = pid_update(&gains, state, 1.0, 0.0, 0.1);

        assert_relative_eq!(state.integral, 0.2, epsilon = 1e-12);
        assert_relative_eq!(output, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_pid_zero_error_gives_zero_output() {
        let (state, output) = pid_update(&GAINS, PidState::default(), 30.0, 30.0, 1.0);

        assert_eq!(output, 0.0);
        assert_eq!(state, PidState::default());
    }

    #[test]
    fn test_pid_derivative_opposes_approach() {
        // 誤差が 10 から 4 に減ると微分項は負になる
        let gains = PidGains { kp: 0.0, ki: 0.0, kd: 1.0 };
        let state = PidState { integral: 0.0, previous_error: 10.0 };
        let (_, output) = pid_update(&gains, state, 30.0, 26.0, 2.0);

        assert_relative_eq!(output, -3.0);
    }
}
