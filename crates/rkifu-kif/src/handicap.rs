//! 駒落ちの初期局面
//!
//! 上手（後手）が駒を落とし、上手から指し始める。

use rkifu_core::{Color, Position, Square};

/// 駒落ちの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handicap {
    Lance,
    RightLance,
    Bishop,
    Rook,
    RookLance,
    TwoPieces,
    FourPieces,
    SixPieces,
    EightPieces,
    TenPieces,
}

/// (筋, 段)
type Cell = (u8, u8);

const LANCE_1: Cell = (1, 1);
const LANCE_9: Cell = (9, 1);
const BISHOP: Cell = (2, 2);
const ROOK: Cell = (8, 2);
const KNIGHTS: [Cell; 2] = [(2, 1), (8, 1)];
const SILVERS: [Cell; 2] = [(3, 1), (7, 1)];
const GOLDS: [Cell; 2] = [(4, 1), (6, 1)];

impl Handicap {
    /// 手合割の表記から判定
    ///
    /// 「右香落ち」「飛香落ち」は「香落ち」を含むので先に判定する。
    pub fn from_label(label: &str) -> Option<Handicap> {
        const LABELS: [(&str, Handicap); 10] = [
            ("右香落ち", Handicap::RightLance),
            ("飛香落ち", Handicap::RookLance),
            ("香落ち", Handicap::Lance),
            ("角落ち", Handicap::Bishop),
            ("飛車落ち", Handicap::Rook),
            ("二枚落ち", Handicap::TwoPieces),
            ("四枚落ち", Handicap::FourPieces),
            ("六枚落ち", Handicap::SixPieces),
            ("八枚落ち", Handicap::EightPieces),
            ("十枚落ち", Handicap::TenPieces),
        ];
        LABELS
            .iter()
            .find(|(text, _)| label.contains(text))
            .map(|&(_, handicap)| handicap)
    }

    /// 落とす駒の升
    fn removed(self) -> Vec<Cell> {
        let two = [ROOK, BISHOP];
        let four = [ROOK, BISHOP, LANCE_1, LANCE_9];
        let mut cells = match self {
            Handicap::Lance => vec![LANCE_1],
            Handicap::RightLance => vec![LANCE_9],
            Handicap::Bishop => vec![BISHOP],
            Handicap::Rook => vec![ROOK],
            Handicap::RookLance => vec![ROOK, LANCE_1],
            Handicap::TwoPieces => two.to_vec(),
            _ => four.to_vec(),
        };
        if matches!(self, Handicap::SixPieces | Handicap::EightPieces | Handicap::TenPieces) {
            cells.extend(KNIGHTS);
        }
        if matches!(self, Handicap::EightPieces | Handicap::TenPieces) {
            cells.extend(SILVERS);
        }
        if self == Handicap::TenPieces {
            cells.extend(GOLDS);
        }
        cells
    }

    /// 初期局面（上手番）
    pub fn position(self) -> Position {
        let mut pos = Position::startpos();
        for (file, rank) in self.removed() {
            if let Some(sq) = Square::new(file, rank) {
                pos.remove_piece(sq);
            }
        }
        pos.set_side_to_move(Color::White);
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(Handicap::from_label("香落ち"), Some(Handicap::Lance));
        assert_eq!(Handicap::from_label("右香落ち"), Some(Handicap::RightLance));
        assert_eq!(Handicap::from_label("飛香落ち"), Some(Handicap::RookLance));
        assert_eq!(Handicap::from_label("二枚落ち"), Some(Handicap::TwoPieces));
        assert_eq!(Handicap::from_label("平手"), None);
        assert_eq!(Handicap::from_label("その他"), None);
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            Handicap::Lance.position().to_sfen(1),
            "lnsgkgsn1/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
        );
        assert_eq!(
            Handicap::TwoPieces.position().to_sfen(1),
            "lnsgkgsnl/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
        );
        assert_eq!(
            Handicap::TenPieces.position().to_sfen(1),
            "4k4/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
        );
    }

    #[test]
    fn test_piece_counts() {
        let counts = [
            (Handicap::Lance, 39),
            (Handicap::RightLance, 39),
            (Handicap::Bishop, 39),
            (Handicap::Rook, 39),
            (Handicap::RookLance, 38),
            (Handicap::TwoPieces, 38),
            (Handicap::FourPieces, 36),
            (Handicap::SixPieces, 34),
            (Handicap::EightPieces, 32),
            (Handicap::TenPieces, 30),
        ];
        for (handicap, expected) in counts {
            assert_eq!(handicap.position().pieces().count(), expected, "{handicap:?}");
        }
    }
}
