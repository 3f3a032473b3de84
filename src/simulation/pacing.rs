// src/simulation/pacing.rs

use std::thread;
use std::time::{Duration, Instant};

/// 刻み間の実時間待ち合わせ戦略
///
/// 表示のためだけに使う。物理計算の結果は待ち合わせの有無に依存しない。
pub trait Pacer {
    /// シミュレーション時刻 `simulated_time` の刻みを終えた直後に呼ばれる
    fn pace(&mut self, simulated_time: f64);
}

/// 待ち合わせをしない (既定)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pace(&mut self, _simulated_time: f64) {}
}

/// シミュレーション時刻を壁時計に合わせる
///
/// `speedup` が 2.0 なら実時間の2倍速で進む。
#[derive(Debug, Clone)]
pub struct RealTimePacer {
    speedup: f64,
    start: Option<Instant>,
}

impl RealTimePacer {
    pub fn new(speedup: f64) -> Self {
        Self {
            speedup: if speedup > 0.0 { speedup } else { 1.0 },
            start: None,
        }
    }
}

impl Pacer for RealTimePacer {
    fn pace(&mut self, simulated_time: f64) {
        let start = *self.start.get_or_insert_with(Instant::now);
        let wall_target = Duration::from_secs_f64((simulated_time / self.speedup).max(0.0));
        let elapsed = start.elapsed();
        if wall_target > elapsed {
            thread::sleep(wall_target - elapsed);
        }
    }
}
