//! 256bit固定長のビットストリーム
//!
//! ビット i は `words[i / 64]` の第 `i % 64` ビットに対応する（下位ビットから順に詰める）。

use super::PackError;

/// ストリームの総ビット数
pub(super) const TOTAL_BITS: usize = 256;

/// 書き込み用ビットストリーム
#[derive(Debug, Default)]
pub(super) struct BitWriter {
    words: [u64; 4],
    bit_cursor: usize,
}

impl BitWriter {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// 1ビット書き込む（256bitを超える書き込みはOverflow）
    pub(super) fn write_one_bit(&mut self, bit: bool) -> Result<(), PackError> {
        if self.bit_cursor >= TOTAL_BITS {
            return Err(PackError::Overflow);
        }
        if bit {
            self.words[self.bit_cursor / 64] |= 1u64 << (self.bit_cursor % 64);
        }
        self.bit_cursor += 1;
        Ok(())
    }

    /// nビット書き込む (下位ビットから順に)
    pub(super) fn write_n_bit(&mut self, value: u32, n: u8) -> Result<(), PackError> {
        for i in 0..n {
            self.write_one_bit((value >> i) & 1 == 1)?;
        }
        Ok(())
    }

    /// 現在のカーソル位置
    pub(super) fn cursor(&self) -> usize {
        self.bit_cursor
    }

    /// ちょうど256bit書き込まれていれば語列を返す
    pub(super) fn finish(self) -> Result<[u64; 4], PackError> {
        if self.bit_cursor != TOTAL_BITS {
            return Err(PackError::Underflow {
                bits: self.bit_cursor,
            });
        }
        Ok(self.words)
    }
}

/// 読み込み用ビットストリーム
#[derive(Debug)]
pub(super) struct BitReader {
    words: [u64; 4],
    bit_cursor: usize,
}

impl BitReader {
    pub(super) fn new(words: [u64; 4]) -> Self {
        Self {
            words,
            bit_cursor: 0,
        }
    }

    /// 1ビット読み込む（終端を超えるとUnderflow）
    pub(super) fn read_one_bit(&mut self) -> Result<bool, PackError> {
        if self.bit_cursor >= TOTAL_BITS {
            return Err(PackError::Underflow {
                bits: self.bit_cursor,
            });
        }
        let bit = (self.words[self.bit_cursor / 64] >> (self.bit_cursor % 64)) & 1 == 1;
        self.bit_cursor += 1;
        Ok(bit)
    }

    /// nビット読み込む (下位ビットから順に格納)
    pub(super) fn read_n_bit(&mut self, n: u8) -> Result<u32, PackError> {
        let mut result = 0u32;
        for i in 0..n {
            result |= (self.read_one_bit()? as u32) << i;
        }
        Ok(result)
    }

    /// 残りビット数
    pub(super) fn remaining(&self) -> usize {
        TOTAL_BITS.saturating_sub(self.bit_cursor)
    }
}
