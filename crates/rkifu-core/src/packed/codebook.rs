//! ハフマン符号表
//!
//! 盤上用と手駒用の2つの表を別々に持つ。どちらも符号値を下位ビットから書き出す。
//!
//! | 駒種 | 盤上     | ビット数 | 手駒  | ビット数 |
//! |------|----------|----------|-------|----------|
//! | 空   | 0        | 1        | -     | -        |
//! | 歩   | 01       | 2        | 0     | 1        |
//! | 香   | 0011     | 4        | 001   | 3        |
//! | 桂   | 1011     | 4        | 101   | 3        |
//! | 銀   | 0111     | 4        | 011   | 3        |
//! | 金   | 01111    | 5        | 0111  | 4        |
//! | 角   | 011111   | 6        | 01111 | 5        |
//! | 飛   | 111111   | 6        | 11111 | 5        |

use crate::types::PieceType;

use super::bitstream::{BitReader, BitWriter};
use super::PackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct HuffmanCode {
    pub(super) code: u8,
    pub(super) bits: u8,
}

const fn hc(code: u8, bits: u8) -> HuffmanCode {
    HuffmanCode { code, bits }
}

/// 盤上の空き升
const BOARD_EMPTY: HuffmanCode = hc(0b0, 1);

/// 盤上の駒 [歩, 香, 桂, 銀, 金, 角, 飛]
const BOARD_TABLE: [HuffmanCode; 7] = [
    hc(0b01, 2),
    hc(0b0011, 4),
    hc(0b1011, 4),
    hc(0b0111, 4),
    hc(0b01111, 5),
    hc(0b011111, 6),
    hc(0b111111, 6),
];

/// 手駒 [歩, 香, 桂, 銀, 金, 角, 飛]
const HAND_TABLE: [HuffmanCode; 7] = [
    hc(0b0, 1),
    hc(0b001, 3),
    hc(0b101, 3),
    hc(0b011, 3),
    hc(0b0111, 4),
    hc(0b01111, 5),
    hc(0b11111, 5),
];

const BOARD_MAX_BITS: u8 = 6;
const HAND_MAX_BITS: u8 = 5;

/// 盤上の符号（Noneは空き升、玉は符号を持たない）
pub(super) fn board_code(kind: Option<PieceType>) -> Option<HuffmanCode> {
    match kind {
        None => Some(BOARD_EMPTY),
        Some(pt) => pt.hand_index().map(|i| BOARD_TABLE[i]),
    }
}

/// 手駒の符号（玉は符号を持たない）
pub(super) fn hand_code(kind: PieceType) -> Option<HuffmanCode> {
    kind.hand_index().map(|i| HAND_TABLE[i])
}

pub(super) fn write_code(w: &mut BitWriter, code: HuffmanCode) -> Result<(), PackError> {
    w.write_n_bit(code.code as u32, code.bits)
}

/// 盤上の符号を1つ読む（Noneは空き升）
pub(super) fn read_board_code(r: &mut BitReader) -> Result<Option<PieceType>, PackError> {
    let mut code = 0u8;
    for bits in 1..=BOARD_MAX_BITS {
        code |= (r.read_one_bit()? as u8) << (bits - 1);
        if hc(code, bits) == BOARD_EMPTY {
            return Ok(None);
        }
        if let Some(i) = BOARD_TABLE.iter().position(|&h| h == hc(code, bits)) {
            return Ok(Some(PieceType::HAND_PIECES[i]));
        }
    }
    Err(PackError::InvalidCode)
}

/// 手駒の符号を1つ読む
pub(super) fn read_hand_code(r: &mut BitReader) -> Result<PieceType, PackError> {
    let mut code = 0u8;
    for bits in 1..=HAND_MAX_BITS {
        code |= (r.read_one_bit()? as u8) << (bits - 1);
        if let Some(i) = HAND_TABLE.iter().position(|&h| h == hc(code, bits)) {
            return Ok(PieceType::HAND_PIECES[i]);
        }
    }
    Err(PackError::InvalidCode)
}
