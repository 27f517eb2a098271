//! 手駒（Hand）

use super::PieceType;

/// 片方の手番の手駒
///
/// 駒種ごとの枚数を歩香桂銀金角飛の順に保持する。枚数は符号なしなので負にならない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hand {
    counts: [u8; PieceType::HAND_NUM],
}

impl Hand {
    /// 空の手駒
    pub const EMPTY: Hand = Hand {
        counts: [0; PieceType::HAND_NUM],
    };

    /// 指定駒種の枚数（玉は常に0）
    #[inline]
    pub fn count(&self, pt: PieceType) -> u8 {
        pt.hand_index().map_or(0, |i| self.counts[i])
    }

    /// 指定駒種を1枚加える（玉はNone）
    #[inline]
    pub fn add(&mut self, pt: PieceType) -> Option<()> {
        self.add_n(pt, 1)
    }

    /// 指定駒種をn枚加える（玉・枚数あふれはNone）
    pub fn add_n(&mut self, pt: PieceType, n: u8) -> Option<()> {
        let i = pt.hand_index()?;
        self.counts[i] = self.counts[i].checked_add(n)?;
        Some(())
    }

    /// 指定駒種を1枚取り除く（持っていなければNone）
    #[inline]
    pub fn remove(&mut self, pt: PieceType) -> Option<()> {
        let i = pt.hand_index()?;
        self.counts[i] = self.counts[i].checked_sub(1)?;
        Some(())
    }

    /// 手駒が空か
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// (駒種, 枚数) を歩香桂銀金角飛の順に返す（0枚の駒種も含む）
    pub fn iter(&self) -> impl Iterator<Item = (PieceType, u8)> + '_ {
        PieceType::HAND_PIECES.iter().map(move |&pt| (pt, self.count(pt)))
    }
}
