//! 文字コード判定と行分割
//!
//! UTF-8として正しければそのまま、そうでなければShift-JISとして変換する。

use std::borrow::Cow;

use encoding_rs::SHIFT_JIS;

use crate::error::KifError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// バイト列をテキストに変換する
pub fn decode_text(bytes: &[u8]) -> Result<Cow<'_, str>, KifError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }
    SHIFT_JIS
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or(KifError::Encoding)
}

/// `\n` で分割し、行末の `\r` を取り除く
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line)).collect()
}
