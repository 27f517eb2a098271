//! 終局表記と対局結果

use serde::Serialize;

/// 終局の表記
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// 投了
    Resign,
    /// 切れ負け
    TimeUp,
    /// 反則勝ち
    IllegalWin,
    /// 反則負け
    IllegalLoss,
    /// 詰み
    Checkmate,
    /// 千日手
    Repetition,
    /// 持将棋
    Jishogi,
    /// 中断
    Abort,
    /// 入玉勝ち・勝ち宣言
    DeclaredWin,
}

impl Terminal {
    pub fn from_token(token: &str) -> Option<Terminal> {
        let terminal = match token {
            "投了" => Terminal::Resign,
            "切れ負け" => Terminal::TimeUp,
            "反則勝ち" => Terminal::IllegalWin,
            "反則負け" => Terminal::IllegalLoss,
            "詰み" => Terminal::Checkmate,
            "千日手" => Terminal::Repetition,
            "持将棋" => Terminal::Jishogi,
            "中断" => Terminal::Abort,
            "入玉勝ち" | "勝ち宣言" => Terminal::DeclaredWin,
            _ => return None,
        };
        Some(terminal)
    }

    /// 最終手が反則手で終わった棋譜か
    pub const fn is_foul(self) -> bool {
        matches!(self, Terminal::IllegalWin | Terminal::IllegalLoss)
    }

    /// 終局行の手数から結果を決める
    ///
    /// 詰み・反則勝ち・宣言勝ちはその手数を指した側、投了・切れ負け・反則負けは
    /// その手番の相手の勝ち（奇数手目が先手）。
    pub const fn result(self, ply: usize) -> GameResult {
        match self {
            Terminal::Abort => GameResult::Aborted,
            Terminal::Repetition | Terminal::Jishogi => GameResult::Draw,
            Terminal::Checkmate | Terminal::IllegalWin | Terminal::DeclaredWin => {
                GameResult::winner_by_ply(ply)
            }
            Terminal::Resign | Terminal::TimeUp | Terminal::IllegalLoss => {
                GameResult::winner_by_ply(ply + 1)
            }
        }
    }
}

/// 対局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    SenteWin,
    GoteWin,
    Draw,
    #[serde(rename = "abort")]
    Aborted,
    Unknown,
}

impl GameResult {
    const fn winner_by_ply(ply: usize) -> GameResult {
        if ply % 2 == 1 {
            GameResult::SenteWin
        } else {
            GameResult::GoteWin
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GameResult::SenteWin => "sente_win",
            GameResult::GoteWin => "gote_win",
            GameResult::Draw => "draw",
            GameResult::Aborted => "abort",
            GameResult::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 棋譜の終局情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub result: GameResult,
    /// 終局表記（投了など）。終局行がなければNone
    pub reason: Option<String>,
    /// 終局行の手数
    pub ply: Option<usize>,
}

impl Outcome {
    pub fn from_terminal(terminal: Terminal, token: &str, ply: usize) -> Outcome {
        Outcome {
            result: terminal.result(ply),
            reason: Some(token.to_string()),
            ply: Some(ply),
        }
    }

    /// 終局行のない棋譜
    pub const fn unknown() -> Outcome {
        Outcome {
            result: GameResult::Unknown,
            reason: None,
            ply: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token() {
        assert_eq!(Terminal::from_token("投了"), Some(Terminal::Resign));
        assert_eq!(Terminal::from_token("勝ち宣言"), Some(Terminal::DeclaredWin));
        assert_eq!(Terminal::from_token("入玉勝ち"), Some(Terminal::DeclaredWin));
        assert_eq!(Terminal::from_token("７六歩(77)"), None);
        assert_eq!(Terminal::from_token(""), None);
    }

    #[test]
    fn test_result_by_parity() {
        let cases = [
            (Terminal::Resign, 13, GameResult::GoteWin),
            (Terminal::Resign, 122, GameResult::SenteWin),
            (Terminal::TimeUp, 41, GameResult::GoteWin),
            (Terminal::IllegalLoss, 6, GameResult::GoteWin),
            (Terminal::IllegalWin, 6, GameResult::GoteWin),
            (Terminal::IllegalWin, 7, GameResult::SenteWin),
            (Terminal::Checkmate, 99, GameResult::SenteWin),
            (Terminal::DeclaredWin, 200, GameResult::GoteWin),
            (Terminal::Repetition, 80, GameResult::Draw),
            (Terminal::Jishogi, 301, GameResult::Draw),
            (Terminal::Abort, 3, GameResult::Aborted),
        ];
        for (terminal, ply, expected) in cases {
            assert_eq!(terminal.result(ply), expected, "{terminal:?} at {ply}");
        }
    }

    #[test]
    fn test_is_foul() {
        assert!(Terminal::IllegalWin.is_foul());
        assert!(Terminal::IllegalLoss.is_foul());
        assert!(!Terminal::Resign.is_foul());
        assert!(!Terminal::Checkmate.is_foul());
    }

    #[test]
    fn test_result_serialize() {
        assert_eq!(serde_json::to_string(&GameResult::SenteWin).unwrap(), "\"sente_win\"");
        assert_eq!(serde_json::to_string(&GameResult::Aborted).unwrap(), "\"abort\"");
        let outcome = Outcome::from_terminal(Terminal::Resign, "投了", 13);
        assert_eq!(outcome.result.to_string(), "gote_win");
        assert_eq!(outcome.reason.as_deref(), Some("投了"));
        assert_eq!(Outcome::unknown().result, GameResult::Unknown);
    }
}
