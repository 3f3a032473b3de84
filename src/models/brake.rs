// src/models/brake.rs

/// 機械ブレーキの判定結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrakeOutcome {
    pub acceleration: f64, // ブレーキ適用後の加速度 (m/s²)
    pub brake_force: f64,  // ブレーキ力 (N)
    pub engaged: bool,
}

/// 積分後の加速度を最大加速度で再チェックする
///
/// 飽和処理の後段にある二段目の制限。通常の流れでは加速度は既にクランプ済みなので
/// 発動しないが、クランプされていない値が渡された場合は超過分をブレーキ力として扱う。
///
/// # 引数
/// - `acceleration`: 現在の加速度
/// - `max_acceleration`: 最大加速度 (正)
/// - `cabin_mass`: かご質量 (kg)
pub fn apply_brake(acceleration: f64, max_acceleration: f64, cabin_mass: f64) -> BrakeOutcome {
    if acceleration.abs() > max_acceleration {
        let brake_force = (acceleration.abs() - max_acceleration) * cabin_mass;
        BrakeOutcome {
            acceleration: acceleration.signum() * max_acceleration,
            brake_force,
            engaged: brake_force > 0.0,
        }
    } else {
        BrakeOutcome {
            acceleration,
            brake_force: 0.0,
            engaged: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_brake_disengaged_within_limit() {
        let outcome = apply_brake(-2.0, 2.0, 1500.0);

        assert_eq!(outcome.acceleration, -2.0);
        assert_eq!(outcome.brake_force, 0.0);
        assert!(!outcome.engaged);
    }

    #[test]
    fn test_brake_engages_on_unclamped_value() {
        let outcome = apply_brake(3.5, 2.0, 1500.0);

        assert_relative_eq!(outcome.brake_force, 2250.0);
        assert_eq!(outcome.acceleration, 2.0);
        assert!(outcome.engaged);
    }

    #[test]
    fn test_brake_keeps_sign() {
        let outcome = apply_brake(-5.0, 2.0, 100.0);

        assert_eq!(outcome.acceleration, -2.0);
        assert_relative_eq!(outcome.brake_force, 300.0);
    }
}
