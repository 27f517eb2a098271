//! 指し手行の判定
//!
//! ```text
//!    1 ７六歩(77)   ( 0:01/00:00:01)
//!   13 投了         ( 0:05/00:01:10)
//!    6 反則勝ち
//! 変化：8手
//! ```

use crate::outcome::Terminal;

/// 1行の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KifLine<'a> {
    /// 指し手（消費時間つき）
    Move { ply: usize, text: &'a str },
    /// 終局（消費時間は省略可）
    Terminal {
        ply: usize,
        terminal: Terminal,
        token: &'a str,
    },
    /// 変化の開始
    Variation,
    Other,
}

/// 行を分類する
pub fn classify_line(line: &str) -> KifLine<'_> {
    if line.trim_start().starts_with("変化") {
        return KifLine::Variation;
    }
    let Some((ply, rest)) = split_ply(line) else {
        return KifLine::Other;
    };

    let clocked = strip_clock(rest).map(|text| text.trim());
    if let Some(text) = clocked {
        if let Some(terminal) = Terminal::from_token(text) {
            return KifLine::Terminal {
                ply,
                terminal,
                token: text,
            };
        }
        if !text.is_empty() {
            return KifLine::Move { ply, text };
        }
        return KifLine::Other;
    }

    let text = rest.trim();
    match Terminal::from_token(text) {
        Some(terminal) => KifLine::Terminal {
            ply,
            terminal,
            token: text,
        },
        None => KifLine::Other,
    }
}

/// 先頭の手数と、空白を挟んだ残り
fn split_ply(line: &str) -> Option<(usize, &str)> {
    let line = line.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let ply = line[..digits].parse().ok()?;
    let rest = &line[digits..];
    if !rest.starts_with(|c: char| c.is_ascii_whitespace()) {
        return None;
    }
    Some((ply, rest.trim_start_matches(|c: char| c.is_ascii_whitespace())))
}

/// 「空白 + `(`」で始まる消費時間の手前までを返す
fn strip_clock(rest: &str) -> Option<&str> {
    let bytes = rest.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            let run = bytes[i..].iter().take_while(|b| b.is_ascii_whitespace()).count();
            if bytes.get(i + run) == Some(&b'(') {
                return Some(&rest[..i]);
            }
            i += run;
        } else {
            i += 1;
        }
    }
    None
}
