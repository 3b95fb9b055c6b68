//! Formato em disco do estado persistido
//!
//! ```text
//! <comprimento-decimal>\n<bytes-brutos>
//! ```
//!
//! O cabeçalho é texto ASCII legível; o blob segue sem delimitador final.

use crate::types::{CorruptState, LoadOutcome, PersistedState};
use std::io::{self, Read, Write};

/// Número máximo de dígitos aceitos no cabeçalho
pub const MAX_HEADER_DIGITS: usize = 20;

/// Grava cabeçalho e blob no writer
pub fn encode<W: Write>(bytes: &[u8], writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", bytes.len())?;
    writer.write_all(bytes)
}

/// Representação completa em memória
pub fn encode_to_vec(bytes: &[u8]) -> Vec<u8> {
    let header = bytes.len().to_string();
    let mut out = Vec::with_capacity(header.len() + 1 + bytes.len());
    out.extend_from_slice(header.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(bytes);
    out
}

/// Lê cabeçalho e blob, copiando no máximo `capacity` bytes.
///
/// Só erros de I/O do reader viram `Err`; cabeçalho inválido é
/// [`LoadOutcome::Corrupt`] e arquivo curto é [`LoadOutcome::Truncated`].
pub fn decode<R: Read>(mut reader: R, capacity: usize) -> io::Result<LoadOutcome> {
    let declared = match read_header(&mut reader)? {
        Ok(declared) => declared,
        Err(reason) => return Ok(LoadOutcome::Corrupt(reason)),
    };

    // O cabeçalho não dimensiona o buffer; cresce só com o que existe
    let wanted = declared.min(capacity);
    let mut bytes = Vec::new();
    reader.take(wanted as u64).read_to_end(&mut bytes)?;

    let state = PersistedState::new(bytes);
    if state.len() < declared {
        Ok(LoadOutcome::Truncated { state, declared })
    } else {
        Ok(LoadOutcome::Restored(state))
    }
}

/// Lê o cabeçalho byte a byte, sem consumir nada além do `\n`.
fn read_header<R: Read>(reader: &mut R) -> io::Result<Result<usize, CorruptState>> {
    let mut value: usize = 0;
    let mut digits = 0;
    let mut byte = [0u8; 1];

    loop {
        match reader.read(&mut byte) {
            Ok(0) if digits == 0 => return Ok(Err(CorruptState::EmptyHeader)),
            Ok(0) => return Ok(Err(CorruptState::MissingNewline)),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }

        match byte[0] {
            b'\n' if digits == 0 => return Ok(Err(CorruptState::EmptyHeader)),
            b'\n' => return Ok(Ok(value)),
            d @ b'0'..=b'9' => {
                digits += 1;
                if digits > MAX_HEADER_DIGITS {
                    return Ok(Err(CorruptState::HeaderTooLong(MAX_HEADER_DIGITS)));
                }
                value = match value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(usize::from(d - b'0')))
                {
                    Some(v) => v,
                    None => return Ok(Err(CorruptState::Overflow)),
                };
            }
            other => return Ok(Err(CorruptState::NonDigit(other))),
        }
    }
}
