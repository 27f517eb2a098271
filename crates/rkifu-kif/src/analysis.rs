//! 棋譜の各局面を評価して対局記録を作る
//!
//! 評価器（USIエンジンなど）は `Evaluator` で抽象化し、同じ局面の評価は
//! `ScoreCache` で使い回す。

use std::collections::HashMap;

use log::{debug, warn};
use rkifu_core::{ErrorCategory, LegalityError, Packed256, Position, pack_position};
use serde::Serialize;

use crate::error::ReplayError;
use crate::outcome::GameResult;
use crate::record::Kif;

/// 評価値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Score {
    /// センチポーン
    Cp(i32),
    /// 詰みまでの手数（負なら詰まされる）
    Mate(i32),
}

impl Score {
    pub const fn kind(self) -> &'static str {
        match self {
            Score::Cp(_) => "cp",
            Score::Mate(_) => "mate",
        }
    }

    pub const fn value(self) -> i32 {
        match self {
            Score::Cp(v) | Score::Mate(v) => v,
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.value())
    }
}

/// 1局面の評価結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub score: Score,
    pub best_move: Option<String>,
}

/// 局面の評価器
pub trait Evaluator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// SFEN（`<board> <b|w> <hand> <move-number>`）の局面を評価する
    fn evaluate(&mut self, sfen: &str) -> Result<Evaluation, Self::Error>;
}

/// 序盤の局面の評価値キャッシュ
///
/// キーは局面の `Packed256`（手数は含まない）。`max_ply` 手目までの局面だけを
/// 保存する。40枚揃っていない局面（駒落ちなど）は圧縮できないので保存しない。
#[derive(Debug, Clone)]
pub struct ScoreCache {
    scores: HashMap<Packed256, Score>,
    max_ply: usize,
    hits: u64,
    misses: u64,
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreCache {
    pub const DEFAULT_MAX_PLY: usize = 30;

    pub fn new() -> Self {
        Self::with_max_ply(Self::DEFAULT_MAX_PLY)
    }

    pub fn with_max_ply(max_ply: usize) -> Self {
        Self {
            scores: HashMap::new(),
            max_ply,
            hits: 0,
            misses: 0,
        }
    }

    pub fn max_ply(&self) -> usize {
        self.max_ply
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// キャッシュ済みの評価値を探す
    pub fn lookup(&mut self, pos: &Position) -> Option<Score> {
        let found = pack_position(pos).ok().and_then(|key| self.scores.get(&key).copied());
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// `ply` 手目の局面の評価値を保存する（保存したらtrue）
    pub fn store(&mut self, pos: &Position, ply: usize, score: Score) -> bool {
        if ply > self.max_ply {
            return false;
        }
        match pack_position(pos) {
            Ok(key) => {
                self.scores.insert(key, score);
                true
            }
            Err(e) => {
                warn!("ply {ply}: position is not cacheable: {e}");
                false
            }
        }
    }
}

/// 1手ごとの評価
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveEval {
    pub ply: usize,
    pub score_type: &'static str,
    pub score_value: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_move: Option<String>,
}

/// 1局分の評価記録
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: String,
    pub sente_name: String,
    pub sente_rating: i32,
    pub gote_name: String,
    pub gote_rating: i32,
    pub result: GameResult,
    pub win_reason: String,
    pub move_count: usize,
    pub move_evals: Vec<MoveEval>,
}

/// 対局記録の作成エラー
#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    #[error("no moves found")]
    NoMoves,
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("move {ply}: {source}")]
    Legality {
        ply: usize,
        #[source]
        source: LegalityError,
    },
    #[error("move {ply}: the side that just moved is in check")]
    IllegalPosition { ply: usize },
    #[error("move {ply}: evaluation failed: {source}")]
    Evaluate {
        ply: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl AnalysisError {
    /// エラー分類（評価器のエラーは分類外）
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            AnalysisError::NoMoves => Some(ErrorCategory::StructuralParse),
            AnalysisError::Replay(e) => Some(e.category()),
            AnalysisError::Legality { source, .. } => Some(source.category()),
            AnalysisError::IllegalPosition { .. } => Some(ErrorCategory::MoveApplication),
            AnalysisError::Evaluate { .. } => None,
        }
    }
}

/// 棋譜の各手を評価して `GameRecord` を作る
///
/// 反則手で終わった棋譜は最後の1手を評価しない。`ply` 手目を指した後の局面を
/// 手数 `ply` のSFENで評価器に渡す。
pub fn build_game_record<E: Evaluator>(
    game_id: impl Into<String>,
    kif: &Kif,
    evaluator: &mut E,
    cache: &mut ScoreCache,
) -> Result<GameRecord, AnalysisError> {
    let game_id = game_id.into();
    let board = &kif.board;
    if board.move_count() == 0 {
        return Err(AnalysisError::NoMoves);
    }

    let count = board.evaluable_move_count();
    let mut pos = board.initial_position().clone();
    let mut move_evals = Vec::with_capacity(count);
    for (i, &mv) in board.moves()[..count].iter().enumerate() {
        let ply = i + 1;
        pos.apply(mv)
            .map_err(|source| ReplayError::Move { ply, source })?;
        if !pos.is_legal().map_err(|source| AnalysisError::Legality { ply, source })? {
            return Err(AnalysisError::IllegalPosition { ply });
        }

        let (score, best_move) = match cache.lookup(&pos) {
            Some(score) => (score, None),
            None => {
                let sfen = pos.to_sfen(ply as u32);
                let eval = evaluator.evaluate(&sfen).map_err(|e| AnalysisError::Evaluate {
                    ply,
                    source: Box::new(e),
                })?;
                cache.store(&pos, ply, eval.score);
                (eval.score, eval.best_move)
            }
        };
        move_evals.push(MoveEval {
            ply,
            score_type: score.kind(),
            score_value: score.value(),
            best_move,
        });
    }

    debug!(
        "{game_id}: evaluated {count} moves (cache hits {}, misses {})",
        cache.hits(),
        cache.misses()
    );
    Ok(GameRecord {
        game_id,
        sente_name: kif.header.black.name.clone(),
        sente_rating: kif.header.black.rating,
        gote_name: kif.header.white.name.clone(),
        gote_rating: kif.header.white.rating,
        result: kif.outcome.result,
        win_reason: kif.outcome.reason.clone().unwrap_or_default(),
        move_count: count,
        move_evals,
    })
}

/// 指し手行の末尾に評価値のコメントを付けた棋譜を返す
///
/// `move_lines` は各指し手の行番号（`Kif::move_lines`）。評価のない指し手
/// （反則で終わった棋譜の最終手）の行はそのまま残す。
pub fn annotate_lines(lines: &[&str], move_lines: &[usize], evals: &[MoveEval]) -> Vec<String> {
    let mut pending = move_lines.iter().zip(evals).peekable();
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| match pending.next_if(|(idx, _)| **idx == i) {
            Some((_, eval)) => format!("{line} {}", format_eval_comment(eval)),
            None => line.to_string(),
        })
        .collect()
}

/// `* eval cp 120` / `* eval mate -3`
fn format_eval_comment(eval: &MoveEval) -> String {
    format!("* eval {} {}", eval.score_type, eval.score_value)
}
