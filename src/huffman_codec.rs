use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::codebook::{CodeBook, ReverseMap};
use crate::config::CodecConfig;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::hufftree::HuffmanTree;
use crate::{packer, unpacker};

/// Code book built from one source, used to encode that source and to
/// decode artifacts produced from it.
///
/// The artifact carries no code table, so decoding needs a codec built from
/// the same original bytes.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    frequencies: FrequencyTable,
    tree: Option<HuffmanTree>,
    codebook: CodeBook,
}

impl HuffmanCodec {
    pub fn from_source(source: &[u8]) -> Result<Self> {
        Self::from_frequencies(FrequencyTable::from_bytes(source))
    }

    /// Build from counts alone. Encoding then accepts any input whose bytes
    /// all appear in `frequencies`.
    pub fn from_frequencies(frequencies: FrequencyTable) -> Result<Self> {
        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        let codebook = match &tree {
            Some(tree) => CodeBook::from_tree(tree)?,
            None => CodeBook::empty(),
        };
        Ok(HuffmanCodec {
            frequencies,
            tree,
            codebook,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_source(&data)
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// `None` when the source was empty.
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    pub fn codebook(&self) -> &CodeBook {
        &self.codebook
    }

    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let bits = packer::encode(data, &self.codebook)?;
        packer::pack(packer::pad(&bits))
    }

    pub fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        decompress(data, self.codebook.reverse_map())
    }
}

/// Compress `input` with a code book derived from `input` itself.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let output = HuffmanCodec::from_source(input)?.encode(input)?;
    tracing::info!(
        input_bytes = input.len(),
        output_bytes = output.len(),
        "compressed"
    );
    Ok(output)
}

/// Decompress an artifact with the reverse map of the code book it was encoded with.
pub fn decompress(input: &[u8], reverse: &ReverseMap) -> Result<Vec<u8>> {
    let padded = unpacker::unpack(input);
    let payload = unpacker::unpad(&padded)?;
    let output = unpacker::decode(&payload, reverse)?;
    tracing::info!(
        input_bytes = input.len(),
        output_bytes = output.len(),
        "decompressed"
    );
    Ok(output)
}

/// The code book `compress` would use for `source`.
pub fn codebook_from(source: &[u8]) -> Result<CodeBook> {
    CodeBook::from_bytes(source)
}

/// Compress the file at `source` into `dest`.
///
/// Nothing is written to `dest` unless every stage, including the optional
/// verification pass, succeeds.
pub fn compress_file(source: &Path, dest: &Path, config: &CodecConfig) -> Result<()> {
    let input = fs::read(source)?;
    let codec = HuffmanCodec::from_source(&input)?;
    let output = codec.encode(&input)?;

    if config.verify {
        let roundtrip = codec.decode(&output)?;
        if roundtrip != input {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "verification failed: artifact does not decode to the source",
            )
            .into());
        }
        tracing::debug!("artifact verified");
    }

    write_atomic(dest, &output)?;
    tracing::info!(
        source = %source.display(),
        dest = %dest.display(),
        input_bytes = input.len(),
        output_bytes = output.len(),
        "file compressed"
    );
    Ok(())
}

/// Decompress the artifact at `compressed` into `dest`, rebuilding the code
/// book from the original file at `source`.
pub fn decompress_file(compressed: &Path, source: &Path, dest: &Path) -> Result<()> {
    let codec = HuffmanCodec::from_file(source)?;
    let input = fs::read(compressed)?;
    let output = codec.decode(&input)?;

    write_atomic(dest, &output)?;
    tracing::info!(
        compressed = %compressed.display(),
        dest = %dest.display(),
        output_bytes = output.len(),
        "file decompressed"
    );
    Ok(())
}

/// Write through a temporary file in the destination directory and rename
/// it into place, so a failed write never leaves a partial `dest`.
fn write_atomic(dest: &Path, data: &[u8]) -> Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}
