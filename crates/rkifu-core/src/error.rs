//! エラー分類
//!
//! 各コンポーネントのエラー型は `category()` でこの分類を返す。
//! 呼び出し側は分類を見て「その棋譜をスキップする」か「不具合として報告する」かを決める。
//! どの分類もこのクレート内でリトライされることはない。

use serde::Serialize;

/// エラーの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// バイト列を文字列として解釈できない
    Encoding,
    /// ヘッダ・盤面・指し手・SFENなどの構文エラー
    StructuralParse,
    /// 指し手を局面に適用できない（壊れた棋譜またはデコーダの不具合）
    MoveApplication,
    /// 局面の圧縮・展開時の不変条件違反
    Codec,
}

impl ErrorCategory {
    /// ログ出力用の短い名前
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Encoding => "encoding",
            ErrorCategory::StructuralParse => "structural_parse",
            ErrorCategory::MoveApplication => "move_application",
            ErrorCategory::Codec => "codec",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
