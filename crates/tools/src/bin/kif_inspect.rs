//! KIF棋譜の検査ツール
//!
//! # 使用例
//!
//! ```bash
//! # 各手数のSFENを表示
//! cargo run -p tools --bin kif_inspect -- sfen game.kif
//!
//! # 各手数の Packed256 を表示（可逆性も確認する）
//! cargo run -p tools --bin kif_inspect -- pack game.kif --ply 10
//!
//! # ディレクトリ以下の棋譜を検査して JSON Lines で出力
//! cargo run -p tools --bin kif_inspect -- scan --root kifu/ --out summary.jsonl.gz
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use rkifu_core::{pack_position, unpack_position};
use rkifu_kif::{Kif, load_kif};
use tools::config::ScanConfig;
use tools::output::JsonLinesWriter;
use tools::scan::scan_dir;

#[derive(Parser)]
#[command(name = "kif-inspect", version, about = "KIF棋譜の検査ツール")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// 各手数の局面をSFENで表示
    Sfen {
        /// KIFファイル
        path: PathBuf,
        /// この手数の局面だけ表示（0=初期局面）
        #[arg(long)]
        ply: Option<usize>,
    },
    /// 各手数の局面を Packed256（16進）で表示
    Pack {
        /// KIFファイル
        path: PathBuf,
        /// この手数の局面だけ表示（0=初期局面）
        #[arg(long)]
        ply: Option<usize>,
    },
    /// ディレクトリ以下の棋譜を検査して1棋譜1行のJSONを出力
    Scan {
        /// 棋譜のルートディレクトリ
        #[arg(long)]
        root: PathBuf,
        /// 出力パス ("-" で標準出力; .gz対応)
        #[arg(long, default_value = "-")]
        out: PathBuf,
        /// 設定ファイル（TOML）
        #[arg(long)]
        config: Option<PathBuf>,
        /// 対象拡張子（カンマ区切り、設定ファイルより優先）
        #[arg(long, value_delimiter = ',')]
        extensions: Vec<String>,
        /// 序盤局面として数える手数の上限（設定ファイルより優先）
        #[arg(long)]
        max_cache_ply: Option<usize>,
        /// 読めない棋譜があったら中断する
        #[arg(long)]
        stop_on_error: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Sfen { path, ply } => run_sfen(&path, ply),
        Cmd::Pack { path, ply } => run_pack(&path, ply),
        Cmd::Scan {
            root,
            out,
            config,
            extensions,
            max_cache_ply,
            stop_on_error,
        } => {
            let mut cfg = match config {
                Some(p) => ScanConfig::load(&p)?,
                None => ScanConfig::default(),
            };
            if !extensions.is_empty() {
                cfg.extensions = extensions;
            }
            if let Some(n) = max_cache_ply {
                cfg.max_cache_ply = n;
            }
            cfg.stop_on_error |= stop_on_error;
            run_scan(&root, &out, &cfg)
        }
    }
}

fn load(path: &Path) -> Result<Kif> {
    load_kif(path).with_context(|| format!("load {}", path.display()))
}

/// 表示する手数の範囲
fn plies(kif: &Kif, ply: Option<usize>) -> Result<std::ops::RangeInclusive<usize>> {
    let last = kif.board.move_count();
    match ply {
        Some(p) if p > last => anyhow::bail!("ply {p} is out of range (0..={last})"),
        Some(p) => Ok(p..=p),
        None => Ok(0..=last),
    }
}

fn run_sfen(path: &Path, ply: Option<usize>) -> Result<()> {
    let kif = load(path)?;
    let mut out = std::io::stdout().lock();
    for p in plies(&kif, ply)? {
        let sfen = kif.board.sfen_at(p)?;
        writeln!(out, "{p}\t{sfen}")?;
    }
    Ok(())
}

fn run_pack(path: &Path, ply: Option<usize>) -> Result<()> {
    let kif = load(path)?;
    let positions = kif.board.replay()?;
    let mut out = std::io::stdout().lock();
    for p in plies(&kif, ply)? {
        let pos = &positions[p];
        let n = p as u32 + 1;
        let packed = pack_position(pos).with_context(|| format!("pack ply {p}"))?;
        let unpacked = unpack_position(packed).with_context(|| format!("unpack ply {p}"))?;
        if unpacked.to_sfen(n) != pos.to_sfen(n) {
            anyhow::bail!("ply {p}: round-trip mismatch: {} != {}", unpacked.to_sfen(n), pos.to_sfen(n));
        }
        writeln!(out, "{p}\t{packed}")?;
    }
    Ok(())
}

fn run_scan(root: &Path, out: &Path, cfg: &ScanConfig) -> Result<()> {
    let mut lines =
        JsonLinesWriter::create(out).with_context(|| format!("open output: {}", out.display()))?;
    let stats = scan_dir(root, cfg, |summary| lines.write(summary).context("write summary"))?;
    let written = lines.finish().context("close output")?;
    info!("wrote {written} lines to {}", out.display());
    if stats.skipped > 0 {
        info!("{} files were skipped", stats.skipped);
    }
    Ok(())
}
