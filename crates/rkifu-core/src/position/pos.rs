//! 局面（Position）

use crate::error::ErrorCategory;
use crate::types::{Color, Hand, Move, Piece, PieceType, Square};

/// 指し手適用エラー
///
/// どのエラーでも局面は変更されない。
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("no {0:?} in hand")]
    EmptyHand(PieceType),
    #[error("drop destination {0} is occupied")]
    OccupiedDestination(Square),
    #[error("no piece at {0}")]
    NoPieceAtSource(Square),
    #[error("piece at {0} belongs to the opponent")]
    WrongMoverColor(Square),
    #[error("capturing own piece at {0}")]
    CaptureOwnPiece(Square),
    #[error("{0:?} cannot promote")]
    CannotPromoteKingOrGold(PieceType),
    #[error("too many {0:?} in hand")]
    HandOverflow(PieceType),
}

impl MoveError {
    /// エラー分類
    pub const fn category(&self) -> ErrorCategory {
        ErrorCategory::MoveApplication
    }
}

/// 将棋の局面
///
/// 盤面は `[段][筋]` の二次元配列で、各マスは駒を値で持つ。
/// 玉は各手番1枚が原則だが、盤面の組み立て途中では欠けていてもよい。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// 各マスの駒 [rank-1][file-1]
    board: [[Option<Piece>; 9]; 9],
    /// 手駒 [Color]
    hands: [Hand; Color::NUM],
    /// 手番
    side_to_move: Color,
}

/// 平手の1段目（9筋から1筋の順）
const BACK_RANK: [PieceType; 9] = [
    PieceType::Lance,
    PieceType::Knight,
    PieceType::Silver,
    PieceType::Gold,
    PieceType::King,
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Knight,
    PieceType::Lance,
];

impl Position {
    // ========== 局面設定 ==========

    /// 駒のない局面を生成（先手番）
    pub fn empty() -> Self {
        Position {
            board: [[None; 9]; 9],
            hands: [Hand::EMPTY; Color::NUM],
            side_to_move: Color::Black,
        }
    }

    /// 平手初期局面を生成
    pub fn startpos() -> Self {
        let mut pos = Position::empty();
        for (i, &pt) in BACK_RANK.iter().enumerate() {
            let file = 9 - i;
            pos.board[8][file - 1] = Some(Piece::new(pt, Color::Black));
            pos.board[0][file - 1] = Some(Piece::new(pt, Color::White));
        }
        for file in 0..9 {
            pos.board[6][file] = Some(Piece::new(PieceType::Pawn, Color::Black));
            pos.board[2][file] = Some(Piece::new(PieceType::Pawn, Color::White));
        }
        // 先手: 8八角 2八飛、後手: 8二飛 2二角
        pos.board[7][7] = Some(Piece::new(PieceType::Bishop, Color::Black));
        pos.board[7][1] = Some(Piece::new(PieceType::Rook, Color::Black));
        pos.board[1][7] = Some(Piece::new(PieceType::Rook, Color::White));
        pos.board[1][1] = Some(Piece::new(PieceType::Bishop, Color::White));
        pos
    }

    /// 駒を置く（置かれていた駒を返す）
    #[inline]
    pub fn put_piece(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.cell_mut(sq).replace(piece)
    }

    /// 駒を取り除く
    #[inline]
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.cell_mut(sq).take()
    }

    /// 手番を設定
    #[inline]
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// 手駒を変更用に取得
    #[inline]
    pub fn hand_mut(&mut self, color: Color) -> &mut Hand {
        &mut self.hands[color.index()]
    }

    // ========== 盤面アクセス ==========

    /// 指定マスの駒を取得
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board[sq.rank() as usize - 1][sq.file() as usize - 1]
    }

    #[inline]
    fn cell_mut(&mut self, sq: Square) -> &mut Option<Piece> {
        &mut self.board[sq.rank() as usize - 1][sq.file() as usize - 1]
    }

    /// 手番
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// 手駒
    #[inline]
    pub fn hand(&self, color: Color) -> &Hand {
        &self.hands[color.index()]
    }

    /// 盤上の全ての駒を段優先の通し番号順に返す
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_on(sq).map(|pc| (sq, pc)))
    }

    /// 玉の位置（なければNone、複数あれば通し番号の小さい方）
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.kind == PieceType::King && pc.color == color)
            .map(|(sq, _)| sq)
    }

    // ========== 指し手 ==========

    /// 指し手を適用して手番を交代する
    ///
    /// 全ての検証を先に行うため、エラー時は局面が変わらない。
    /// 駒を取った場合は成りを戻した駒種を手駒に加える。
    /// `promote` が偽でも既に成っている駒は成ったまま動く。
    pub fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        let us = self.side_to_move;
        match mv {
            Move::Drop { kind, to } => {
                if self.hand(us).count(kind) == 0 {
                    return Err(MoveError::EmptyHand(kind));
                }
                if self.piece_on(to).is_some() {
                    return Err(MoveError::OccupiedDestination(to));
                }
                self.hands[us.index()]
                    .remove(kind)
                    .ok_or(MoveError::EmptyHand(kind))?;
                self.put_piece(to, Piece::new(kind, us));
            }
            Move::Board { from, to, promote } => {
                let mut piece = self.piece_on(from).ok_or(MoveError::NoPieceAtSource(from))?;
                if piece.color != us {
                    return Err(MoveError::WrongMoverColor(from));
                }
                let captured = self.piece_on(to);
                if captured.is_some_and(|c| c.color == us) {
                    return Err(MoveError::CaptureOwnPiece(to));
                }
                if promote && !piece.kind.can_promote() {
                    return Err(MoveError::CannotPromoteKingOrGold(piece.kind));
                }

                // 玉は手駒にならない（王手放置の後で玉を取る棋譜のみ）
                let gained = captured.map(|c| c.kind).filter(|&k| k != PieceType::King);
                if let Some(kind) = gained {
                    // 失敗時は手駒も変わらない
                    self.hands[us.index()].add(kind).ok_or(MoveError::HandOverflow(kind))?;
                }
                self.remove_piece(from);
                piece.promoted |= promote;
                self.put_piece(to, piece);
            }
        }
        self.side_to_move = us.opponent();
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::empty()
    }
}
