//! ヘッダ（対局者・開始日時・棋戦・手合割）の抽出

use serde::Serialize;

/// 対局者
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Player {
    pub name: String,
    /// レーティング（表記がなければ0）
    pub rating: i32,
}

impl Player {
    /// `name(rating)` 形式を名前とレーティングに分ける
    pub fn parse(raw: &str) -> Player {
        let raw = raw.trim();
        split_rating(raw).unwrap_or_else(|| Player {
            name: raw.to_string(),
            rating: 0,
        })
    }
}

fn split_rating(raw: &str) -> Option<Player> {
    let body = raw.strip_suffix(')')?;
    let open = body.rfind('(')?;
    let name = body[..open].trim();
    let digits = &body[open + 1..];
    if name.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(Player {
        name: name.to_string(),
        rating: digits.parse().unwrap_or(0),
    })
}

/// KIFヘッダ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Header {
    /// 先手（下手）
    pub black: Player,
    /// 後手（上手）
    pub white: Player,
    /// 開始日時（原文のまま）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    /// 棋戦
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// 手合割（原文のまま）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handicap: Option<String>,
}

impl Header {
    pub fn parse(lines: &[&str]) -> Header {
        Header {
            black: Player::parse(header_value(lines, &["先手", "下手"]).unwrap_or_default()),
            white: Player::parse(header_value(lines, &["後手", "上手"]).unwrap_or_default()),
            started_at: header_value(lines, &["開始日時"]).map(str::to_string),
            event: header_value(lines, &["棋戦"]).map(str::to_string),
            handicap: header_value(lines, &["手合割"]).map(str::to_string),
        }
    }
}

/// `ラベル：値` / `ラベル:値` の値を返す（ラベルは先に並べたものを優先）
pub(crate) fn header_value<'a>(lines: &[&'a str], labels: &[&str]) -> Option<&'a str> {
    labels.iter().find_map(|label| {
        lines.iter().find_map(|line| {
            let rest = line.trim().strip_prefix(label)?;
            let value = rest.strip_prefix('：').or_else(|| rest.strip_prefix(':'))?;
            Some(value.trim())
        })
    })
}
