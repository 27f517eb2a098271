//! 駒種（PieceType）と駒（Piece）

use super::Color;

/// 駒種（先後・成りの区別なし）
///
/// 成りは `Piece::promoted` で別に持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PieceType {
    Pawn = 0,
    Lance = 1,
    Knight = 2,
    Silver = 3,
    Gold = 4,
    Bishop = 5,
    Rook = 6,
    King = 7,
}

impl PieceType {
    /// 駒種の数
    pub const NUM: usize = 8;

    /// 手駒になる駒種の数
    pub const HAND_NUM: usize = 7;

    /// 手駒になる駒種一覧（歩香桂銀金角飛）
    pub const HAND_PIECES: [PieceType; 7] = [
        PieceType::Pawn,
        PieceType::Lance,
        PieceType::Knight,
        PieceType::Silver,
        PieceType::Gold,
        PieceType::Bishop,
        PieceType::Rook,
    ];

    /// SFENの手駒表記順（飛角金銀桂香歩）
    pub const SFEN_HAND_ORDER: [PieceType; 7] = [
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Gold,
        PieceType::Silver,
        PieceType::Knight,
        PieceType::Lance,
        PieceType::Pawn,
    ];

    /// 成れるかどうか
    #[inline]
    pub const fn can_promote(self) -> bool {
        matches!(
            self,
            PieceType::Pawn
                | PieceType::Lance
                | PieceType::Knight
                | PieceType::Silver
                | PieceType::Bishop
                | PieceType::Rook
        )
    }

    /// 手駒のインデックス（玉はNone）
    #[inline]
    pub const fn hand_index(self) -> Option<usize> {
        match self {
            PieceType::King => None,
            _ => Some(self as usize),
        }
    }

    /// SFENの駒文字（先手=大文字）
    pub const fn to_sfen_char(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Lance => 'L',
            PieceType::Knight => 'N',
            PieceType::Silver => 'S',
            PieceType::Gold => 'G',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::King => 'K',
        }
    }

    /// SFENの駒文字から変換（大文字小文字は区別しない）
    pub fn from_sfen_char(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'L' => Some(PieceType::Lance),
            'N' => Some(PieceType::Knight),
            'S' => Some(PieceType::Silver),
            'G' => Some(PieceType::Gold),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }
}

/// 駒（駒種・先後・成り）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
    pub promoted: bool,
}

impl Piece {
    /// 生駒を生成
    #[inline]
    pub const fn new(kind: PieceType, color: Color) -> Piece {
        Piece {
            kind,
            color,
            promoted: false,
        }
    }

    /// 成駒を生成（成れない駒種ならNone）
    #[inline]
    pub const fn promoted(kind: PieceType, color: Color) -> Option<Piece> {
        if kind.can_promote() {
            Some(Piece {
                kind,
                color,
                promoted: true,
            })
        } else {
            None
        }
    }

    /// 王手判定で金と同じ動きをするか（金、成香・成桂・成銀・と）
    #[inline]
    pub const fn moves_like_gold(self) -> bool {
        match self.kind {
            PieceType::Gold => true,
            PieceType::Pawn | PieceType::Lance | PieceType::Knight | PieceType::Silver => {
                self.promoted
            }
            _ => false,
        }
    }

    /// SFEN表記（"+p" など）
    pub fn to_sfen(self) -> String {
        let c = self.kind.to_sfen_char();
        let c = match self.color {
            Color::Black => c,
            Color::White => c.to_ascii_lowercase(),
        };
        if self.promoted { format!("+{c}") } else { c.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_promote() {
        assert!(PieceType::Pawn.can_promote());
        assert!(PieceType::Rook.can_promote());
        assert!(!PieceType::Gold.can_promote());
        assert!(!PieceType::King.can_promote());
    }

    #[test]
    fn test_hand_index() {
        for (i, pt) in PieceType::HAND_PIECES.iter().enumerate() {
            assert_eq!(pt.hand_index(), Some(i));
        }
        assert_eq!(PieceType::King.hand_index(), None);
    }

    #[test]
    fn test_promoted_constructor() {
        assert!(Piece::promoted(PieceType::Silver, Color::Black).is_some());
        assert!(Piece::promoted(PieceType::Gold, Color::Black).is_none());
        assert!(Piece::promoted(PieceType::King, Color::White).is_none());
    }

    #[test]
    fn test_moves_like_gold() {
        assert!(Piece::new(PieceType::Gold, Color::Black).moves_like_gold());
        assert!(!Piece::new(PieceType::Silver, Color::Black).moves_like_gold());
        assert!(Piece::promoted(PieceType::Silver, Color::Black).unwrap().moves_like_gold());
        assert!(!Piece::promoted(PieceType::Rook, Color::White).unwrap().moves_like_gold());
    }

    #[test]
    fn test_piece_to_sfen() {
        assert_eq!(Piece::new(PieceType::Pawn, Color::Black).to_sfen(), "P");
        assert_eq!(Piece::new(PieceType::King, Color::White).to_sfen(), "k");
        assert_eq!(Piece::promoted(PieceType::Bishop, Color::White).unwrap().to_sfen(), "+b");
    }
}
