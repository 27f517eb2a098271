//! KIF読み込み・再生のエラー型

use std::path::PathBuf;

use rkifu_core::{ErrorCategory, MoveError};

/// 指し手表記（`７六歩(77)` など）の解析エラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("'同' without a previous destination")]
    MissingPriorDestination,
    #[error("invalid destination in {0:?}")]
    InvalidDestination(String),
    #[error("unknown piece in {0:?}")]
    UnknownPiece(String),
    #[error("missing source square in {0:?}")]
    MissingSourceSquare(String),
    #[error("cannot drop a promoted piece: {0:?}")]
    CannotDropPromoted(String),
}

/// 盤面図の1段の解析エラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("dangling gote marker")]
    DanglingGoteMarker,
    #[error("missing piece after '成'")]
    MissingPromotedBase,
    #[error("unknown piece {0:?}")]
    UnknownPiece(char),
    #[error("expected 9 cells, got {0}")]
    CellCount(usize),
}

/// KIFの読み込みエラー
#[derive(thiserror::Error, Debug)]
pub enum KifError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("input is neither UTF-8 nor Shift-JIS")]
    Encoding,
    #[error("no board definition found")]
    NoBoardDefinition,
    #[error("board must have 9 rows, got {0}")]
    BoardRowCount(usize),
    #[error("board row {row}: {source}")]
    BoardRow {
        row: usize,
        #[source]
        source: RowError,
    },
    #[error("invalid hand line: {0}")]
    HandLine(String),
    #[error("line {line}: {source}")]
    Move {
        line: usize,
        #[source]
        source: TokenError,
    },
}

impl KifError {
    /// エラー分類
    ///
    /// ファイルが読めない場合も「テキストとして取得できない」ので `Encoding` に含める。
    pub const fn category(&self) -> ErrorCategory {
        match self {
            KifError::Io { .. } | KifError::Encoding => ErrorCategory::Encoding,
            _ => ErrorCategory::StructuralParse,
        }
    }
}

/// 棋譜の再生エラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// `ply` 手目（1始まり）が適用できない
    #[error("move {ply}: {source}")]
    Move {
        ply: usize,
        #[source]
        source: MoveError,
    },
    #[error("ply {ply} is out of range (0..={len})")]
    OutOfRange { ply: usize, len: usize },
}

impl ReplayError {
    /// エラー分類
    pub const fn category(&self) -> ErrorCategory {
        match self {
            ReplayError::Move { .. } => ErrorCategory::MoveApplication,
            ReplayError::OutOfRange { .. } => ErrorCategory::StructuralParse,
        }
    }
}
