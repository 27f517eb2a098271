//! Packed256: 局面の256bit可逆圧縮
//!
//! 重複排除やキャッシュのキーに使う固定長の局面指紋。
//!
//! # データ形式
//!
//! ビットストリームで以下の順序で格納:
//! 1. 手番 (1bit): 0=先手, 1=後手
//! 2. 先手玉位置 (7bit): 段優先の通し番号 0-80
//! 3. 後手玉位置 (7bit)
//! 4. 盤上の駒 (ハフマン符号化): 通し番号順に81升分（玉の升はスキップ）。
//!    駒の場合は符号の後に先後 (1bit)、成れる駒種なら成り (1bit)
//! 5. 手駒 (ハフマン符号化): 先手→後手、歩香桂銀金角飛の順に1枚ずつ。
//!    符号の後に先後 (1bit)、金以外は成り (1bit, 常に0)
//!
//! 合計がちょうど256bitになるのは40枚揃った局面だけで、駒落ちの局面は符号化できない。

mod bitstream;
mod codebook;

use std::fmt;

use crate::error::ErrorCategory;
use crate::position::Position;
use crate::types::{Color, Piece, PieceType, Square};

use bitstream::{BitReader, BitWriter};
use codebook::{board_code, hand_code, read_board_code, read_hand_code, write_code};

/// 圧縮・展開エラー
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackError {
    #[error("bitstream overflow: more than 256 bits")]
    Overflow,
    #[error("bitstream underflow at {bits} bits")]
    Underflow { bits: usize },
    #[error("both kings on square index {0}")]
    DuplicateKingSquare(usize),
    #[error("invalid king square index {0}")]
    InvalidKingSquare(usize),
    #[error("{0:?} king is missing")]
    MissingKing(Color),
    #[error("multiple {0:?} kings")]
    MultipleKings(Color),
    #[error("promoted {0:?} in hand")]
    PromotedPieceInHand(PieceType),
    #[error("invalid huffman code")]
    InvalidCode,
}

impl PackError {
    /// エラー分類
    pub const fn category(&self) -> ErrorCategory {
        ErrorCategory::Codec
    }
}

/// 256bitの局面指紋
///
/// 4語のu64で保持し、構築後は変更しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Packed256 {
    words: [u64; 4],
}

impl Packed256 {
    /// バイト数
    pub const SIZE: usize = 32;

    /// 語列から生成
    pub const fn from_words(words: [u64; 4]) -> Self {
        Self { words }
    }

    /// 語列（ビット i は `words[i / 64]` の第 `i % 64` ビット）
    pub const fn words(&self) -> [u64; 4] {
        self.words
    }

    /// リトルエンディアンのバイト列に変換
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(self.words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// リトルエンディアンのバイト列から生成
    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        let mut words = [0u64; 4];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_le_bytes(buf);
        }
        Self { words }
    }
}

impl fmt::Display for Packed256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes() {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// 先手玉・後手玉の通し番号
fn king_indices(pos: &Position) -> Result<(usize, usize), PackError> {
    let mut kings = [None; Color::NUM];
    for (sq, pc) in pos.pieces() {
        if pc.kind != PieceType::King {
            continue;
        }
        let slot = &mut kings[pc.color.index()];
        if slot.is_some() {
            return Err(PackError::MultipleKings(pc.color));
        }
        *slot = Some(sq.index());
    }
    let black = kings[Color::Black.index()].ok_or(PackError::MissingKing(Color::Black))?;
    let white = kings[Color::White.index()].ok_or(PackError::MissingKing(Color::White))?;
    Ok((black, white))
}

/// 局面を256bitに圧縮する
pub fn pack_position(pos: &Position) -> Result<Packed256, PackError> {
    let mut stream = BitWriter::new();

    stream.write_one_bit(pos.side_to_move() == Color::White)?;
    let (black_king, white_king) = king_indices(pos)?;
    stream.write_n_bit(black_king as u32, 7)?;
    stream.write_n_bit(white_king as u32, 7)?;

    for sq in Square::all() {
        if sq.index() == black_king || sq.index() == white_king {
            continue;
        }
        let piece = pos.piece_on(sq);
        // 玉の升は飛ばしているので、ここに玉があれば符号がない
        let Some(code) = board_code(piece.map(|pc| pc.kind)) else {
            return Err(PackError::InvalidCode);
        };
        write_code(&mut stream, code)?;
        if let Some(pc) = piece {
            stream.write_one_bit(pc.color == Color::White)?;
            if pc.kind.can_promote() {
                stream.write_one_bit(pc.promoted)?;
            }
        }
    }

    for color in Color::ALL {
        for (pt, count) in pos.hand(color).iter() {
            let Some(code) = hand_code(pt) else { continue };
            for _ in 0..count {
                write_code(&mut stream, code)?;
                stream.write_one_bit(color == Color::White)?;
                if pt.can_promote() {
                    stream.write_one_bit(false)?;
                }
            }
        }
    }

    stream.finish().map(Packed256::from_words)
}

/// 256bitから局面を復元する
pub fn unpack_position(packed: Packed256) -> Result<Position, PackError> {
    let mut stream = BitReader::new(packed.words());
    let mut pos = Position::empty();

    // 1. 手番
    let side = if stream.read_one_bit()? { Color::White } else { Color::Black };
    pos.set_side_to_move(side);

    // 2. 玉の位置
    let black_king = stream.read_n_bit(7)? as usize;
    let white_king = stream.read_n_bit(7)? as usize;
    let black_sq = Square::from_index(black_king).ok_or(PackError::InvalidKingSquare(black_king))?;
    let white_sq = Square::from_index(white_king).ok_or(PackError::InvalidKingSquare(white_king))?;
    if black_king == white_king {
        return Err(PackError::DuplicateKingSquare(black_king));
    }
    pos.put_piece(black_sq, Piece::new(PieceType::King, Color::Black));
    pos.put_piece(white_sq, Piece::new(PieceType::King, Color::White));

    // 3. 盤上の駒
    for sq in Square::all() {
        if sq == black_sq || sq == white_sq {
            continue;
        }
        let Some(kind) = read_board_code(&mut stream)? else {
            continue;
        };
        let color = if stream.read_one_bit()? { Color::White } else { Color::Black };
        let promoted = kind.can_promote() && stream.read_one_bit()?;
        pos.put_piece(sq, Piece { kind, color, promoted });
    }

    // 4. 手駒（残りビットを全て使う）
    while stream.remaining() > 0 {
        let kind = read_hand_code(&mut stream)?;
        let color = if stream.read_one_bit()? { Color::White } else { Color::Black };
        if kind.can_promote() && stream.read_one_bit()? {
            return Err(PackError::PromotedPieceInHand(kind));
        }
        pos.hand_mut(color).add(kind).ok_or(PackError::InvalidCode)?;
    }

    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::SFEN_HIRATE;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn test_pack_startpos_header() {
        let packed = pack_position(&Position::startpos()).unwrap();
        // 手番0、先手玉5九=76、後手玉5一=4
        assert_eq!(packed.words()[0] & 0x7fff, (76 << 1) | (4 << 8));
        let pos = unpack_position(packed).unwrap();
        assert_eq!(pos.to_sfen(1), SFEN_HIRATE);
        assert_eq!(pos, Position::startpos());
    }

    #[test]
    fn test_roundtrip_with_hands_and_promoted_pieces() {
        for sfen in [
            "lnsg3nl/1r2k1gs1/p1ppppp1p/9/1p7/9/PPPPPPP1P/1BG6/LNS1KGSNL b BPrp 13",
            "lnsg2snl/1r2k1g+R1/p1ppppp1p/9/1p7/9/PPPPPPP1P/1BG6/LNS1KGSNL w BPp 12",
            "ln5nl/7k1/p1pppgspp/5p3/9/2P6/PP1PPPPPP/1SG4+R1/LNK3SNL w BG2Prbgs 1",
        ] {
            let pos = Position::from_sfen(sfen).unwrap();
            let packed = pack_position(&pos).unwrap();
            let restored = unpack_position(packed).unwrap();
            assert_eq!(restored.to_sfen(1), pos.to_sfen(1));
            assert_eq!(restored, pos);
        }
    }

    #[test]
    fn test_distinct_positions_distinct_keys() {
        let a = pack_position(&Position::startpos()).unwrap();
        let mut pos = Position::startpos();
        pos.set_side_to_move(Color::White);
        let b = pack_position(&pos).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.words()[0] ^ b.words()[0], 1);
    }

    #[test]
    fn test_bytes_and_hex() {
        let packed = pack_position(&Position::startpos()).unwrap();
        let bytes = packed.to_bytes();
        assert_eq!(Packed256::from_bytes(&bytes), packed);
        assert_eq!(bytes[0], packed.words()[0] as u8);
        let hex = packed.to_string();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_pack_errors() {
        let mut pos = Position::startpos();
        pos.remove_piece(sq(1, 7));
        assert_eq!(pack_position(&pos), Err(PackError::Underflow { bits: 253 }));

        let mut pos = Position::startpos();
        pos.hand_mut(Color::Black).add(PieceType::Pawn).unwrap();
        assert_eq!(pack_position(&pos), Err(PackError::Overflow));

        let mut pos = Position::startpos();
        pos.remove_piece(sq(5, 1));
        assert_eq!(pack_position(&pos), Err(PackError::MissingKing(Color::White)));

        let mut pos = Position::startpos();
        pos.put_piece(Square::SQ_55, Piece::new(PieceType::King, Color::Black));
        assert_eq!(pack_position(&pos), Err(PackError::MultipleKings(Color::Black)));
    }

    #[test]
    fn test_unpack_errors() {
        assert_eq!(
            unpack_position(Packed256::from_words([0; 4])),
            Err(PackError::DuplicateKingSquare(0))
        );
        assert_eq!(
            unpack_position(Packed256::from_words([81 << 1, 0, 0, 0])),
            Err(PackError::InvalidKingSquare(81))
        );

        // 空き升79個で94bit、その後の歩の成りビット(96)を立てる
        let kings = (76 << 1) | (4 << 8);
        assert_eq!(
            unpack_position(Packed256::from_words([kings, 1 << 32, 0, 0])),
            Err(PackError::PromotedPieceInHand(PieceType::Pawn))
        );

        // 歩53枚(159bit)の後、残り3bitでは金の符号が途切れる
        assert_eq!(
            unpack_position(Packed256::from_words([kings, 0, 0, 0b111 << 61])),
            Err(PackError::Underflow { bits: 256 })
        );
    }
}
