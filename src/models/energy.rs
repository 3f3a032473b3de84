// src/models/energy.rs

/// 累積エネルギー (J)
///
/// どちらも単調非減少で、実行途中でリセットされない。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTotals {
    pub consumed: f64,
    pub generated: f64,
}

/// 瞬時電力を時間積分して累積エネルギーに加える純粋関数
///
/// `power >= 0` なら消費側、負なら回生側に加算する。
pub fn accumulate_energy(totals: EnergyTotals, power: f64, dt: f64) -> EnergyTotals {
    if power >= 0.0 {
        EnergyTotals {
            consumed: totals.consumed + power * dt,
            ..totals
        }
    } else {
        EnergyTotals {
            generated: totals.generated - power * dt,
            ..totals
        }
    }
}

/// 平均電力 (kW相当)。表示専用で、物理計算には使わない
pub fn average_power_kw(energy: f64, elapsed: f64) -> f64 {
    if elapsed > 0.0 {
        energy / (elapsed * 1000.0)
    } else {
        0.0
    }
}
