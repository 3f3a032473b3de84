// src/simulation/error.rs

use thiserror::Error;

/// 実行中のエラー (レポート出力の失敗)
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("レポートの書き込みに失敗しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSVの書き込みに失敗しました: {0}")]
    Csv(#[from] csv::Error),
}

/// 位置または速度の発散 (勧告のみで、シミュレーションは止めない)
///
/// PIDゲインの調整が不安定である可能性を示す。
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "数値が発散しています (t = {time:.1} s, 位置 = {position} m, 速度 = {velocity} m/s)。PIDゲインが不安定な可能性があります"
)]
pub struct NumericInstability {
    pub time: f64,
    pub position: f64,
    pub velocity: f64,
}
