//! KIF形式の棋譜の読み込み
//!
//! - `decode`: 文字コード判定（UTF-8 / Shift-JIS）と行分割
//! - `header`: 対局者・開始日時などのヘッダ
//! - `diagram` / `handicap`: 初期局面（盤面図・駒落ち）
//! - `line` / `notation`: 指し手行の判定と指し手表記の解析
//! - `outcome`: 終局表記と対局結果
//! - `record`: `Kif` / `Board` と棋譜の読み込み
//! - `analysis`: 評価器を使った対局記録の作成
//! - `files`: 棋譜ファイルの列挙

pub mod analysis;
pub mod decode;
mod diagram;
pub mod error;
pub mod files;
pub mod handicap;
pub mod header;
pub mod line;
pub mod notation;
pub mod outcome;
pub mod record;

pub use analysis::{
    AnalysisError, Evaluation, Evaluator, GameRecord, MoveEval, Score, ScoreCache, annotate_lines,
    build_game_record,
};
pub use error::{KifError, ReplayError, RowError, TokenError};
pub use files::{collect_files, collect_kif_files};
pub use handicap::Handicap;
pub use header::{Header, Player};
pub use outcome::{GameResult, Outcome, Terminal};
pub use record::{Board, Kif, load_kif, parse_kif, parse_kif_str};
