//! `scan` の出力（1レコード1行のJSON）
//!
//! 出力先は `-`（標準出力）、ファイル、`.gz` で終わるパスならgzip圧縮ファイル。

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;

enum Sink {
    Stdout(io::StdoutLock<'static>),
    File(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

/// JSON Lines の書き出し先
///
/// gzipの終端を書くため、最後に `finish()` を呼ぶこと。
#[must_use = "call .finish() to flush the output"]
pub struct JsonLinesWriter {
    sink: Sink,
    written: usize,
}

impl JsonLinesWriter {
    pub fn create(path: &Path) -> io::Result<Self> {
        let sink = if path.as_os_str() == "-" {
            Sink::Stdout(io::stdout().lock())
        } else {
            let file = BufWriter::new(File::create(path)?);
            let gz = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("gz"));
            if gz {
                Sink::Gzip(GzEncoder::new(file, Compression::default()))
            } else {
                Sink::File(file)
            }
        };
        Ok(Self { sink, written: 0 })
    }

    fn out(&mut self) -> &mut dyn Write {
        match &mut self.sink {
            Sink::Stdout(s) => s,
            Sink::File(f) => f,
            Sink::Gzip(g) => g,
        }
    }

    /// 1件を1行で書く
    pub fn write<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        let out = self.out();
        serde_json::to_writer(&mut *out, value)?;
        out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// 書き出しを終えて件数を返す
    pub fn finish(self) -> io::Result<usize> {
        match self.sink {
            Sink::Stdout(mut s) => s.flush()?,
            Sink::File(mut f) => f.flush()?,
            Sink::Gzip(g) => g.finish()?.flush()?,
        }
        Ok(self.written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[derive(Serialize)]
    struct Row<'a> {
        path: &'a str,
        moves: usize,
    }

    const EXPECTED: &str = "{\"path\":\"a.kif\",\"moves\":12}\n{\"path\":\"b.kif\",\"moves\":0}\n";

    fn write_rows(path: &Path) -> usize {
        let mut out = JsonLinesWriter::create(path).unwrap();
        out.write(&Row { path: "a.kif", moves: 12 }).unwrap();
        out.write(&Row { path: "b.kif", moves: 0 }).unwrap();
        assert_eq!(out.written(), 2);
        out.finish().unwrap()
    }

    #[test]
    fn test_plain_file() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("summary.jsonl");
        assert_eq!(write_rows(&path), 2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), EXPECTED);
    }

    #[test]
    fn test_gzip_file() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("summary.jsonl.GZ");
        assert_eq!(write_rows(&path), 2);

        let mut text = String::new();
        flate2::read::GzDecoder::new(File::open(&path).unwrap()).read_to_string(&mut text).unwrap();
        assert_eq!(text, EXPECTED);
    }

    #[test]
    fn test_create_fails_in_missing_dir() {
        let td = tempfile::tempdir().unwrap();
        assert!(JsonLinesWriter::create(&td.path().join("missing/out.jsonl")).is_err());
    }
}
