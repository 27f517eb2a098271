//! KIF棋譜の読み込みと局面の再生

use std::path::Path;

use log::debug;
use rkifu_core::{Move, Position, Square};

use crate::decode::{decode_text, split_lines};
use crate::diagram::position_from_diagram;
use crate::error::{KifError, ReplayError};
use crate::handicap::Handicap;
use crate::header::{Header, header_value};
use crate::line::{KifLine, classify_line};
use crate::notation::parse_move_text;
use crate::outcome::{Outcome, Terminal};

/// 初期局面と指し手列
///
/// 途中局面は初期局面を複製して再生するので、`Board` 自体は変更されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    initial: Position,
    moves: Vec<Move>,
    foul_end: bool,
}

impl Board {
    pub fn new(initial: Position, moves: Vec<Move>, foul_end: bool) -> Self {
        Self {
            initial,
            moves,
            foul_end,
        }
    }

    pub fn initial_position(&self) -> &Position {
        &self.initial
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// 反則手で終わった棋譜か（最後の指し手は反則手）
    pub fn is_foul_end(&self) -> bool {
        self.foul_end
    }

    /// 評価対象の手数（反則手で終わった場合は最後の1手を除く）
    pub fn evaluable_move_count(&self) -> usize {
        if self.foul_end {
            self.moves.len().saturating_sub(1)
        } else {
            self.moves.len()
        }
    }

    /// `ply` 手指した後の局面（0 は初期局面）
    pub fn position_at(&self, ply: usize) -> Result<Position, ReplayError> {
        if ply > self.moves.len() {
            return Err(ReplayError::OutOfRange {
                ply,
                len: self.moves.len(),
            });
        }
        let mut pos = self.initial.clone();
        for (i, &mv) in self.moves[..ply].iter().enumerate() {
            pos.apply(mv).map_err(|source| ReplayError::Move { ply: i + 1, source })?;
        }
        Ok(pos)
    }

    /// `ply` 手指した後の局面のSFEN（手数は `ply + 1`）
    pub fn sfen_at(&self, ply: usize) -> Result<String, ReplayError> {
        let pos = self.position_at(ply)?;
        Ok(pos.to_sfen(ply as u32 + 1))
    }

    /// 初期局面から最終局面までのすべての局面
    pub fn replay(&self) -> Result<Vec<Position>, ReplayError> {
        let mut positions = Vec::with_capacity(self.moves.len() + 1);
        let mut pos = self.initial.clone();
        positions.push(pos.clone());
        for (i, &mv) in self.moves.iter().enumerate() {
            pos.apply(mv).map_err(|source| ReplayError::Move { ply: i + 1, source })?;
            positions.push(pos.clone());
        }
        Ok(positions)
    }
}

/// 読み込んだ棋譜
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kif {
    pub header: Header,
    pub board: Board,
    pub outcome: Outcome,
    /// 各指し手の行番号（0始まり、`board.moves()` と同じ順）
    pub move_lines: Vec<usize>,
}

/// KIFファイルを読み込む
pub fn load_kif(path: impl AsRef<Path>) -> Result<Kif, KifError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| KifError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loading {}", path.display());
    parse_kif(&bytes)
}

/// KIFのバイト列（UTF-8 または Shift-JIS）を解析する
pub fn parse_kif(bytes: &[u8]) -> Result<Kif, KifError> {
    let text = decode_text(bytes)?;
    parse_kif_str(&text)
}

/// KIFテキストを解析する
pub fn parse_kif_str(text: &str) -> Result<Kif, KifError> {
    let lines = split_lines(text);
    let header = Header::parse(&lines);
    let initial = initial_position(&lines)?;
    let MainLine {
        moves,
        move_lines,
        terminal,
        outcome,
    } = parse_moves(&lines)?;
    let foul_end = terminal.is_some_and(Terminal::is_foul);

    debug!(
        "parsed {} moves, result {} ({})",
        moves.len(),
        outcome.result,
        outcome.reason.as_deref().unwrap_or("-")
    );
    Ok(Kif {
        header,
        board: Board::new(initial, moves, foul_end),
        outcome,
        move_lines,
    })
}

/// 初期局面: 平手 > 盤面図 > 駒落ちの手合割
fn initial_position(lines: &[&str]) -> Result<Position, KifError> {
    let handicap = header_value(lines, &["手合割"]);
    if handicap.is_some_and(|h| h.contains("平手")) {
        return Ok(Position::startpos());
    }
    if let Some(pos) = position_from_diagram(lines)? {
        return Ok(pos);
    }
    handicap
        .and_then(Handicap::from_label)
        .map(Handicap::position)
        .ok_or(KifError::NoBoardDefinition)
}

/// 本譜
struct MainLine {
    moves: Vec<Move>,
    move_lines: Vec<usize>,
    terminal: Option<Terminal>,
    outcome: Outcome,
}

/// 本譜の指し手を終局行または変化の手前まで読む
fn parse_moves(lines: &[&str]) -> Result<MainLine, KifError> {
    let mut moves = Vec::new();
    let mut move_lines = Vec::new();
    let mut prev_dest: Option<Square> = None;
    for (i, line) in lines.iter().enumerate() {
        match classify_line(line) {
            KifLine::Move { text, .. } => {
                let mv = parse_move_text(text, prev_dest)
                    .map_err(|source| KifError::Move { line: i + 1, source })?;
                prev_dest = Some(mv.to());
                moves.push(mv);
                move_lines.push(i);
            }
            KifLine::Terminal {
                ply,
                terminal,
                token,
            } => {
                return Ok(MainLine {
                    moves,
                    move_lines,
                    terminal: Some(terminal),
                    outcome: Outcome::from_terminal(terminal, token, ply),
                });
            }
            KifLine::Variation => {
                debug!("variation at line {}, stop reading moves", i + 1);
                break;
            }
            KifLine::Other => {}
        }
    }
    Ok(MainLine {
        moves,
        move_lines,
        terminal: None,
        outcome: Outcome::unknown(),
    })
}
