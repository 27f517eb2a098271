//! KIF棋譜の検査・走査ツール（`kif_inspect`）の共通部分

pub mod config;
pub mod output;
pub mod scan;
