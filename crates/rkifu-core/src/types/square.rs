//! 升目（Square）

use std::fmt;

/// 升目（筋 1-9, 段 1-9）
///
/// 筋は表示上右から左へ 1〜9、段は上から下へ 1〜9。
/// 圧縮形式で使う通し番号は段優先で `(rank - 1) * 9 + (file - 1)`（1一=0, 9一=8, 1二=9, ..., 9九=80）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// 升目の数
    pub const NUM: usize = 81;

    /// 1一
    pub const SQ_11: Square = Square { file: 1, rank: 1 };
    /// 5五（中央）
    pub const SQ_55: Square = Square { file: 5, rank: 5 };
    /// 9九
    pub const SQ_99: Square = Square { file: 9, rank: 9 };

    /// 筋と段からSquareを生成（範囲外ならNone）
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Square> {
        if file >= 1 && file <= 9 && rank >= 1 && rank <= 9 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// 符号付きの筋・段から生成（盤外ならNone）
    #[inline]
    pub(crate) fn from_signed(file: i8, rank: i8) -> Option<Square> {
        if (1..=9).contains(&file) && (1..=9).contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// 筋（1-9）
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// 段（1-9）
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// 段優先の通し番号（0-80）
    #[inline]
    pub const fn index(self) -> usize {
        (self.rank as usize - 1) * 9 + (self.file as usize - 1)
    }

    /// 通し番号から生成（範囲チェックあり）
    #[inline]
    pub const fn from_index(index: usize) -> Option<Square> {
        if index < Self::NUM {
            Some(Square {
                file: (index % 9) as u8 + 1,
                rank: (index / 9) as u8 + 1,
            })
        } else {
            None
        }
    }

    /// USI形式の文字列（"7g"等）に変換
    pub fn to_usi(self) -> String {
        self.to_string()
    }

    /// USI形式の文字列からSquareに変換
    pub fn from_usi(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = chars.next()?.to_digit(10)? as u8;
        let rank_char = chars.next()?;
        if chars.next().is_some() || !('a'..='i').contains(&rank_char) {
            return None;
        }
        Square::new(file, rank_char as u8 - b'a' + 1)
    }

    /// 全ての升を通し番号順に返すイテレータ
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM).filter_map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, (b'a' + self.rank - 1) as char)
    }
}
