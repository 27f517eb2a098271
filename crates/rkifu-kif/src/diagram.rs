//! 盤面図（局面図）からの初期局面の復元
//!
//! ```text
//! 後手の持駒：飛　角
//!   ９ ８ ７ ６ ５ ４ ３ ２ １
//! +---------------------------+
//! |v香v桂 ・ ・ ・ ・ ・v桂v香|一
//! ...
//! +---------------------------+
//! 先手の持駒：角　金　歩二
//! 手番：後手
//! ```

use rkifu_core::{Color, Hand, Piece, PieceType, Position, Square};

use crate::error::{KifError, RowError};

/// 盤面図の段（`|` で始まる行の、最後の `|` までの中身）
pub(crate) fn board_rows<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines
        .iter()
        .filter_map(|line| {
            let body = line.trim().strip_prefix('|')?;
            Some(body.rfind('|').map_or("", |end| &body[..end]))
        })
        .collect()
}

/// 盤面図・手番・持駒から局面を作る（盤面図がなければNone）
pub(crate) fn position_from_diagram(lines: &[&str]) -> Result<Option<Position>, KifError> {
    let rows = board_rows(lines);
    if rows.is_empty() {
        return Ok(None);
    }
    if rows.len() < 9 {
        return Err(KifError::BoardRowCount(rows.len()));
    }

    let mut pos = Position::empty();
    for (i, row) in rows.iter().take(9).enumerate() {
        let rank = i as u8 + 1;
        let cells = parse_row(row).map_err(|source| KifError::BoardRow { row: i + 1, source })?;
        // 左端が9筋
        for (j, cell) in cells.into_iter().enumerate() {
            if let (Some(piece), Some(sq)) = (cell, Square::new(9 - j as u8, rank)) {
                pos.put_piece(sq, piece);
            }
        }
    }

    pos.set_side_to_move(parse_turn(lines));
    for line in lines {
        let line = line.trim();
        let color = if line.starts_with("先手の持駒") || line.starts_with("下手の持駒") {
            Color::Black
        } else if line.starts_with("後手の持駒") || line.starts_with("上手の持駒") {
            Color::White
        } else {
            continue;
        };
        let hand = parse_hand_line(line)?;
        for (pt, count) in hand.iter() {
            pos.hand_mut(color)
                .add_n(pt, count)
                .ok_or_else(|| KifError::HandLine(line.to_string()))?;
        }
    }
    Ok(Some(pos))
}

/// 1段を9升に分解する
fn parse_row(row: &str) -> Result<[Option<Piece>; 9], RowError> {
    let mut cells = Vec::with_capacity(9);
    let mut chars = row.chars();
    while let Some(c) = chars.next() {
        match c {
            ' ' | '\t' | '\u{3000}' => continue,
            '・' => {
                cells.push(None);
                continue;
            }
            _ => {}
        }
        let (color, c) = if c == 'v' {
            (Color::White, chars.next().ok_or(RowError::DanglingGoteMarker)?)
        } else {
            (Color::Black, c)
        };
        let (kind, promoted) = match c {
            'と' => (PieceType::Pawn, true),
            '馬' => (PieceType::Bishop, true),
            '龍' | '竜' => (PieceType::Rook, true),
            '成' => {
                let base = chars.next().ok_or(RowError::MissingPromotedBase)?;
                let pt = base_piece(base)
                    .filter(|pt| {
                        matches!(
                            pt,
                            PieceType::Silver | PieceType::Knight | PieceType::Lance | PieceType::Pawn
                        )
                    })
                    .ok_or(RowError::UnknownPiece(base))?;
                (pt, true)
            }
            _ => (base_piece(c).ok_or(RowError::UnknownPiece(c))?, false),
        };
        cells.push(Some(Piece { kind, color, promoted }));
    }
    <[Option<Piece>; 9]>::try_from(cells).map_err(|cells| RowError::CellCount(cells.len()))
}

fn base_piece(c: char) -> Option<PieceType> {
    match c {
        '歩' => Some(PieceType::Pawn),
        '香' => Some(PieceType::Lance),
        '桂' => Some(PieceType::Knight),
        '銀' => Some(PieceType::Silver),
        '金' => Some(PieceType::Gold),
        '角' => Some(PieceType::Bishop),
        '飛' => Some(PieceType::Rook),
        '玉' | '王' => Some(PieceType::King),
        _ => None,
    }
}

/// `手番：後手` / `手番：上手` なら後手番
fn parse_turn(lines: &[&str]) -> Color {
    lines
        .iter()
        .map(|line| line.trim())
        .find(|line| line.starts_with("手番"))
        .filter(|line| line.contains("後手") || line.contains("上手"))
        .map_or(Color::Black, |_| Color::White)
}

/// `先手の持駒：角　金　歩二` を解析する
fn parse_hand_line(line: &str) -> Result<Hand, KifError> {
    let err = || KifError::HandLine(line.to_string());
    let (_, text) = line
        .split_once('：')
        .or_else(|| line.split_once(':'))
        .ok_or_else(err)?;
    let text = text.trim();

    let mut hand = Hand::EMPTY;
    if text == "なし" {
        return Ok(hand);
    }

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if matches!(c, ' ' | '\u{3000}' | '\t') {
            continue;
        }
        let pt = base_piece(c).filter(|&pt| pt != PieceType::King).ok_or_else(err)?;
        let mut digits = String::new();
        while let Some(&d) = chars.peek() {
            if !(d.is_ascii_digit() || kanji_digit(d).is_some() || d == '十') {
                break;
            }
            digits.push(d);
            chars.next();
        }
        let count = if digits.is_empty() { 1 } else { parse_count(&digits).ok_or_else(err)? };
        if count == 0 {
            return Err(err());
        }
        hand.add_n(pt, count).ok_or_else(err)?;
    }
    Ok(hand)
}

fn kanji_digit(c: char) -> Option<u8> {
    "一二三四五六七八九"
        .chars()
        .position(|k| k == c)
        .map(|i| i as u8 + 1)
}

/// 枚数（算用数字、または「十」を含む漢数字）
fn parse_count(s: &str) -> Option<u8> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok();
    }
    let chars: Vec<char> = s.chars().collect();
    match chars.as_slice() {
        ['十'] => Some(10),
        [d] => kanji_digit(*d),
        ['十', d] => kanji_digit(*d).map(|n| 10 + n),
        [t, '十'] => kanji_digit(*t).map(|n| n * 10),
        [t, '十', d] => Some(kanji_digit(*t)? * 10 + kanji_digit(*d)?),
        _ => None,
    }
}
