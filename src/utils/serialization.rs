use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use bincode::Options;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{BigWordsError, Result};
use crate::words::presence::PresenceTrie;

const MAGIC: [u8; 4] = *b"BWIX";
/// Bumped whenever the encoding of the trie changes
pub const FORMAT_VERSION: u16 = 1;

/// Written in front of the encoded trie
#[derive(Debug, Serialize, Deserialize)]
struct IndexHeader {
    magic: [u8; 4],
    version: u16,
}

fn options() -> impl Options {
    bincode::DefaultOptions::new().with_no_limit()
}

fn decode_error(e: bincode::Error) -> BigWordsError {
    match *e {
        bincode::ErrorKind::Io(io) if io.kind() != std::io::ErrorKind::UnexpectedEof => {
            BigWordsError::Io(io)
        }
        // Includes structural checks run while decoding the trie
        other => BigWordsError::corrupt(other.to_string()),
    }
}

fn encode_error(e: bincode::Error) -> BigWordsError {
    match *e {
        bincode::ErrorKind::Io(io) => BigWordsError::Io(io),
        other => BigWordsError::corrupt(format!("failed to encode index: {}", other)),
    }
}

pub fn write_index<W: Write>(trie: &PresenceTrie, mut writer: W) -> Result<()> {
    let header = IndexHeader {
        magic: MAGIC,
        version: FORMAT_VERSION,
    };
    options().serialize_into(&mut writer, &header).map_err(encode_error)?;
    options().serialize_into(&mut writer, trie).map_err(encode_error)?;
    writer.flush()?;
    Ok(())
}

/// Reads an index written by [`write_index`]. Anything that fails to decode or
/// breaks a trie invariant comes back as [`BigWordsError::CorruptIndex`].
pub fn read_index<R: Read>(mut reader: R) -> Result<PresenceTrie> {
    let header: IndexHeader = options().deserialize_from(&mut reader).map_err(decode_error)?;
    if header.magic != MAGIC {
        return Err(BigWordsError::corrupt("not a word index file"));
    }
    if header.version != FORMAT_VERSION {
        return Err(BigWordsError::corrupt(format!(
            "unsupported index version {} (expected {})",
            header.version, FORMAT_VERSION
        )));
    }
    options().deserialize_from(&mut reader).map_err(decode_error)
}

pub fn index_to_bytes(trie: &PresenceTrie) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_index(trie, &mut bytes)?;
    Ok(bytes)
}

pub fn index_from_bytes(bytes: &[u8]) -> Result<PresenceTrie> {
    let mut reader = bytes;
    let trie = read_index(&mut reader)?;
    if !reader.is_empty() {
        return Err(BigWordsError::corrupt(format!("{} trailing bytes", reader.len())));
    }
    Ok(trie)
}

pub fn save_index<P: AsRef<Path>>(trie: &PresenceTrie, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_index(trie, BufWriter::new(file))?;
    info!("Saved word index to {}", path.as_ref().display());
    Ok(())
}

pub fn load_index<P: AsRef<Path>>(path: P) -> Result<PresenceTrie> {
    let file = File::open(path.as_ref())?;
    let trie = read_index(BufReader::new(file))?;
    info!("Loaded word index from {}: {}", path.as_ref().display(), trie.stats());
    Ok(trie)
}

/// Loads the index cached at `path`, or calls `build` when the cache is
/// missing, corrupt, or `rebuild` is set. A freshly built index is written
/// back to `path`; failing to write it is logged and the index still returned.
pub fn load_or_build<P, F>(path: P, rebuild: bool, build: F) -> Result<PresenceTrie>
where
    P: AsRef<Path>,
    F: FnOnce() -> Result<PresenceTrie>,
{
    let path = path.as_ref();
    if !rebuild && path.exists() {
        match load_index(path) {
            Ok(trie) => return Ok(trie),
            Err(e) if e.is_corrupt_index() => warn!("{}, rebuilding", e),
            Err(e) => return Err(e),
        }
    }
    info!("Building word index...");
    let trie = build()?;
    if let Err(e) = save_index(&trie, path) {
        warn!("Could not cache word index at {}: {}", path.display(), e);
    }
    Ok(trie)
}
