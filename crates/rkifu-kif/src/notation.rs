//! 指し手表記の解析
//!
//! `<移動先><駒>[<相対位置>][成|不成][打](<移動元>)` を `Move` に変換する。
//! 移動元が明示されるので、右・左・直・上・引・寄・行 は読み捨てる。

use rkifu_core::{Move, PieceType, Square};

use crate::error::TokenError;

/// 駒の表記
struct Glyph {
    text: &'static str,
    kind: PieceType,
    /// 既に成っている駒（と・馬・龍）
    promoted: bool,
    /// 成駒の二文字表記（成銀など）。成りとして扱う
    force_promote: bool,
}

const fn glyph(text: &'static str, kind: PieceType, promoted: bool, force_promote: bool) -> Glyph {
    Glyph {
        text,
        kind,
        promoted,
        force_promote,
    }
}

/// 駒表記の一覧（最長一致で照合する）
const GLYPHS: [Glyph; 17] = [
    glyph("成銀", PieceType::Silver, false, true),
    glyph("成桂", PieceType::Knight, false, true),
    glyph("成香", PieceType::Lance, false, true),
    glyph("成歩", PieceType::Pawn, false, true),
    glyph("と", PieceType::Pawn, true, false),
    glyph("馬", PieceType::Bishop, true, false),
    glyph("龍", PieceType::Rook, true, false),
    glyph("竜", PieceType::Rook, true, false),
    glyph("王", PieceType::King, false, false),
    glyph("玉", PieceType::King, false, false),
    glyph("飛", PieceType::Rook, false, false),
    glyph("角", PieceType::Bishop, false, false),
    glyph("金", PieceType::Gold, false, false),
    glyph("銀", PieceType::Silver, false, false),
    glyph("桂", PieceType::Knight, false, false),
    glyph("香", PieceType::Lance, false, false),
    glyph("歩", PieceType::Pawn, false, false),
];

/// 指し手表記を解析する
///
/// `prev_dest` は直前の指し手の移動先（`同` の解決に使う）。
pub fn parse_move_text(text: &str, prev_dest: Option<Square>) -> Result<Move, TokenError> {
    let work = text.trim();

    let (to, rest) = match work.strip_prefix('同') {
        Some(rest) => {
            let to = prev_dest.ok_or(TokenError::MissingPriorDestination)?;
            (to, rest.trim_start_matches([' ', '\u{3000}']))
        }
        None => parse_destination(work).ok_or_else(|| TokenError::InvalidDestination(text.to_string()))?,
    };

    let glyph = GLYPHS
        .iter()
        .filter(|g| rest.starts_with(g.text))
        .max_by_key(|g| g.text.len())
        .ok_or_else(|| TokenError::UnknownPiece(text.to_string()))?;
    let rest = &rest[glyph.text.len()..];

    // 移動元 "(77)" とそれより前の修飾部分
    let (modifiers, from) = match rest.find('(') {
        Some(open) => (&rest[..open], parse_source(&rest[open..])),
        None => (rest, None),
    };
    let no_promote = modifiers.contains("不成");
    let promote_marker = !no_promote && modifiers.contains('成');
    let drop = modifiers.contains('打');

    if drop {
        if glyph.promoted || glyph.force_promote {
            return Err(TokenError::CannotDropPromoted(text.to_string()));
        }
        return Ok(Move::Drop { kind: glyph.kind, to });
    }

    let from = from.ok_or_else(|| TokenError::MissingSourceSquare(text.to_string()))?;
    let promote = (glyph.force_promote || promote_marker) && !no_promote;
    Ok(Move::Board { from, to, promote })
}

/// 先頭2文字の移動先（`７六`, `76` 形式の筋は全角・半角どちらも可）
fn parse_destination(text: &str) -> Option<(Square, &str)> {
    let mut chars = text.char_indices();
    let (_, f) = chars.next()?;
    let (_, r) = chars.next()?;
    let rest = chars.next().map_or("", |(i, _)| &text[i..]);
    let sq = Square::new(file_digit(f)?, rank_kanji(r)?)?;
    Some((sq, rest))
}

fn file_digit(c: char) -> Option<u8> {
    match c {
        '1'..='9' => Some(c as u8 - b'0'),
        '１'..='９' => Some((c as u32 - '１' as u32) as u8 + 1),
        _ => None,
    }
}

fn rank_kanji(c: char) -> Option<u8> {
    "一二三四五六七八九"
        .chars()
        .position(|k| k == c)
        .map(|i| i as u8 + 1)
}

/// `(77)` 形式の移動元
fn parse_source(text: &str) -> Option<Square> {
    let bytes = text.as_bytes();
    match bytes {
        [b'(', f @ b'1'..=b'9', r @ b'1'..=b'9', b')', ..] => Square::new(f - b'0', r - b'0'),
        _ => None,
    }
}
