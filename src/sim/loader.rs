//! Program image loading and SRAM dumps.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::common::SimError;
use crate::mem::{Sram, SRAM_WORDS};

/// Parses a program image: one hexadecimal 32-bit word per line, at
/// most 65536 lines. Blank lines are skipped.
pub fn load_image(path: &Path) -> Result<Vec<u32>, SimError> {
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut words = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        if words.len() == SRAM_WORDS {
            return Err(SimError::ImageTooLarge {
                path: path.to_path_buf(),
            });
        }
        let word = u32::from_str_radix(token, 16).map_err(|_| SimError::ImageParse {
            path: path.to_path_buf(),
            line: idx + 1,
            token: token.to_string(),
        })?;
        words.push(word);
    }
    Ok(words)
}

/// Dumps an SRAM to a file: one 8-digit hex word per line for every
/// address from 0 to 65535.
pub fn dump_sram(path: &Path, sram: &Sram) -> Result<(), SimError> {
    let io_err = |source| SimError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    for addr in 0..SRAM_WORDS {
        writeln!(out, "{:08x}", sram.extract(addr as u16)).map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}
