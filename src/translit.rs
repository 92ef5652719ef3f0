//! Byte transliteration table with delete and squeeze modes.
//!
//! Sets are ASCII-oriented: literal bytes, `a-b` ranges, and the POSIX
//! classes `[:lower:]` and `[:upper:]`. The table is built once at parse
//! time and immutable afterwards; applying it is a single left-to-right
//! pass over the record buffer through one advancing write index, with no
//! auxiliary allocation.

use crate::error::PipelineError;
use crate::record::Record;

/// 256-entry byte map plus SET1 membership mask.
pub struct TranslitTable {
    map: [u8; 256],
    selected: [bool; 256],
    delete: bool,
    squeeze: bool,
}

impl TranslitTable {
    /// Build a table from SET1 and an optional SET2.
    ///
    /// - delete mode: SET1 membership marks bytes to drop; SET2 is unused.
    /// - `set2 == None`: identity map, so with squeeze this collapses runs
    ///   of SET1 members (`tr -s l`).
    /// - `set2` present but denoting no bytes: every selected byte maps to
    ///   the degenerate value 0. A corner case, but a defined one.
    /// - otherwise: SET1 members map positionally onto SET2's bytes
    ///   enumerated in ascending value order, padding with the last byte
    ///   when SET2 is shorter.
    pub fn build(
        set1: &str,
        set2: Option<&str>,
        delete: bool,
        squeeze: bool,
    ) -> Result<Self, PipelineError> {
        let selected = parse_set(set1)?;
        let mut map = [0u8; 256];
        for (i, slot) in map.iter_mut().enumerate() {
            *slot = i as u8;
        }
        let mut table = TranslitTable {
            map,
            selected,
            delete,
            squeeze,
        };
        if delete {
            return Ok(table);
        }
        if let Some(s2) = set2 {
            let sel2 = parse_set(s2)?;
            let mut seq: Vec<u8> = (0..=255u8).filter(|&c| sel2[c as usize]).collect();
            if seq.is_empty() {
                seq.push(0);
            }
            let mut k = 0;
            for c in 0..256 {
                if table.selected[c] {
                    table.map[c] = seq[k.min(seq.len() - 1)];
                    k += 1;
                }
            }
        }
        Ok(table)
    }

    /// Transform the record in place. Operates on the whole buffer,
    /// terminator included.
    pub fn apply(&self, record: &mut Record) {
        let len = {
            let buf = record.bytes_mut();
            let mut wp = 0;
            for rp in 0..buf.len() {
                let ch = buf[rp];
                if self.delete {
                    if self.selected[ch as usize] {
                        continue;
                    }
                    buf[wp] = ch;
                    wp += 1;
                } else {
                    let out = if self.selected[ch as usize] {
                        self.map[ch as usize]
                    } else {
                        ch
                    };
                    if self.squeeze && wp > 0 && buf[wp - 1] == out && self.selected[ch as usize] {
                        continue;
                    }
                    buf[wp] = out;
                    wp += 1;
                }
            }
            wp
        };
        record.truncate(len);
    }
}

/// Parse one SET into a 256-entry membership mask.
fn parse_set(spec: &str) -> Result<[bool; 256], PipelineError> {
    let bytes = spec.as_bytes();
    let mut sel = [false; 256];
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'[' && i + 1 < bytes.len() && bytes[i + 1] == b':' {
            let rest = &spec[i + 2..];
            let Some(end) = rest.find(":]") else {
                return Err(PipelineError::parse("unterminated character class"));
            };
            match &rest[..end] {
                "lower" => {
                    for c in b'a'..=b'z' {
                        sel[c as usize] = true;
                    }
                }
                "upper" => {
                    for c in b'A'..=b'Z' {
                        sel[c as usize] = true;
                    }
                }
                name => {
                    return Err(PipelineError::parse(format!(
                        "unsupported character class [:{name}:]"
                    )));
                }
            }
            i += 2 + end + 2;
            continue;
        }
        if i + 2 < bytes.len() && bytes[i + 1] == b'-' {
            let (a, z) = (bytes[i], bytes[i + 2]);
            if a > z {
                return Err(PipelineError::parse(format!(
                    "decreasing range '{}-{}'",
                    a as char, z as char
                )));
            }
            for c in a..=z {
                sel[c as usize] = true;
            }
            i += 3;
            continue;
        }
        sel[bytes[i] as usize] = true;
        i += 1;
    }
    Ok(sel)
}
