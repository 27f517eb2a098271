//! 棋譜ディレクトリの走査
//!
//! 各棋譜を読み込み、全局面を再生して合法性と `Packed256` の可逆性を確かめ、
//! 1棋譜1件の `RecordSummary` を作る。

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use rkifu_core::{Packed256, pack_position, unpack_position};
use rkifu_kif::{GameResult, Kif, collect_files, load_kif};
use serde::Serialize;

use crate::config::ScanConfig;

/// 1棋譜の検査結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub path: PathBuf,
    pub sente_name: String,
    pub sente_rating: i32,
    pub gote_name: String,
    pub gote_rating: i32,
    pub result: GameResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub move_count: usize,
    pub foul_end: bool,
    /// 指した側の玉に王手がかかった最初の手数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub illegal_ply: Option<usize>,
    /// `Packed256` に変換できた局面数（駒落ちなど40枚揃わない局面は数えない）
    pub packed_positions: usize,
}

/// 走査全体の集計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub files: usize,
    pub records: usize,
    pub skipped: usize,
    pub moves: usize,
    /// `max_cache_ply` 手目までの異なる局面数
    pub opening_positions: usize,
}

/// 1棋譜を検査する
///
/// `openings` には `max_ply` 手目までの局面を追加する。
pub fn inspect_kif(
    path: &Path,
    kif: &Kif,
    max_ply: usize,
    openings: &mut HashSet<Packed256>,
) -> Result<RecordSummary> {
    let positions = kif.board.replay().with_context(|| format!("replay {}", path.display()))?;

    let mut illegal_ply = None;
    let mut packed_positions = 0;
    for (ply, pos) in positions.iter().enumerate() {
        if ply > 0 && illegal_ply.is_none() && !pos.is_legal().with_context(|| format!("ply {ply}"))? {
            illegal_ply = Some(ply);
        }
        let Ok(packed) = pack_position(pos) else {
            continue;
        };
        let n = ply as u32 + 1;
        let unpacked = unpack_position(packed).with_context(|| format!("unpack ply {ply}"))?;
        if unpacked.to_sfen(n) != pos.to_sfen(n) {
            anyhow::bail!("{}: ply {ply}: packed position does not round-trip", path.display());
        }
        packed_positions += 1;
        if ply > 0 && ply <= max_ply {
            openings.insert(packed);
        }
    }

    Ok(RecordSummary {
        path: path.to_path_buf(),
        sente_name: kif.header.black.name.clone(),
        sente_rating: kif.header.black.rating,
        gote_name: kif.header.white.name.clone(),
        gote_rating: kif.header.white.rating,
        result: kif.outcome.result,
        reason: kif.outcome.reason.clone(),
        move_count: kif.board.move_count(),
        foul_end: kif.board.is_foul_end(),
        illegal_ply,
        packed_positions,
    })
}

/// `root` 以下の棋譜を走査し、検査できたものを `emit` に渡す
///
/// 読めない棋譜は警告を出して飛ばす（`stop_on_error` なら中断する）。
pub fn scan_dir(
    root: &Path,
    config: &ScanConfig,
    mut emit: impl FnMut(&RecordSummary) -> Result<()>,
) -> Result<ScanStats> {
    let files = collect_files(root, config.extensions.as_slice())
        .with_context(|| format!("walk {}", root.display()))?;
    info!("found {} files in {}", files.len(), root.display());

    let mut stats = ScanStats {
        files: files.len(),
        ..ScanStats::default()
    };
    let mut openings = HashSet::new();
    for path in &files {
        let summary = load_kif(path)
            .with_context(|| format!("load {}", path.display()))
            .and_then(|kif| inspect_kif(path, &kif, config.max_cache_ply, &mut openings));
        match summary {
            Ok(summary) => {
                stats.records += 1;
                stats.moves += summary.move_count;
                emit(&summary)?;
            }
            Err(e) if config.stop_on_error => return Err(e),
            Err(e) => {
                warn!("skip {}: {e:#}", path.display());
                stats.skipped += 1;
            }
        }
    }
    stats.opening_positions = openings.len();
    info!(
        "scanned {} records ({} skipped, {} moves, {} opening positions)",
        stats.records, stats.skipped, stats.moves, stats.opening_positions
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const GAME: &str = "手合割：平手
先手：alice(1500)
後手：bob
   1 ７六歩(77)   ( 0:01/00:00:01)
   2 ３四歩(33)   ( 0:01/00:00:01)
   3 投了   ( 0:01/00:00:02)
";

    const FOUL: &str = "手合割：平手
   1 ７六歩(77)   ( 0:01/00:00:01)
   2 ３四歩(33)   ( 0:01/00:00:01)
   3 ６八玉(59)   ( 0:01/00:00:01)
   4 ８八角成(22)   ( 0:01/00:00:01)
   5 ７八玉(68)   ( 0:01/00:00:01)
   6 反則勝ち
";

    fn write_tree(root: &Path) {
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("a.kif"), GAME).unwrap();
        fs::write(root.join("sub/b.KIF"), FOUL).unwrap();
        // 局面図も手合割もない
        fs::write(root.join("sub/broken.kif"), "先手：x\n").unwrap();
        fs::write(root.join("c.kifu"), GAME).unwrap();
    }

    #[test]
    fn test_scan_dir() {
        let td = tempfile::tempdir().unwrap();
        write_tree(td.path());

        let mut seen = Vec::new();
        let stats = scan_dir(td.path(), &ScanConfig::default(), |s| {
            seen.push(s.clone());
            Ok(())
        })
        .unwrap();

        assert_eq!(stats.files, 3);
        assert_eq!(stats.records, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.moves, 7);
        // 1・2手目は共通
        assert_eq!(stats.opening_positions, 5);

        assert_eq!(seen[0].sente_name, "alice");
        assert_eq!(seen[0].sente_rating, 1500);
        assert_eq!(seen[0].result, GameResult::GoteWin);
        assert_eq!(seen[0].illegal_ply, None);
        assert_eq!(seen[0].packed_positions, 3);

        assert!(seen[1].foul_end);
        assert_eq!(seen[1].illegal_ply, Some(5));
    }

    #[test]
    fn test_scan_dir_extensions_and_stop_on_error() {
        let td = tempfile::tempdir().unwrap();
        write_tree(td.path());

        let config = ScanConfig {
            extensions: vec!["kifu".to_string()],
            ..ScanConfig::default()
        };
        let stats = scan_dir(td.path(), &config, |_| Ok(())).unwrap();
        assert_eq!(stats.records, 1);

        let config = ScanConfig {
            stop_on_error: true,
            ..ScanConfig::default()
        };
        assert!(scan_dir(td.path(), &config, |_| Ok(())).is_err());
    }

    #[test]
    fn test_summary_json() {
        let kif = rkifu_kif::parse_kif_str(GAME).unwrap();
        let mut openings = HashSet::new();
        let summary = inspect_kif(Path::new("a.kif"), &kif, 30, &mut openings).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["result"], "gote_win");
        assert_eq!(json["reason"], "投了");
        assert!(json.get("illegal_ply").is_none());
        assert_eq!(openings.len(), 2);
    }
}
