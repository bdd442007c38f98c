//! File I/O and the `.bpk` container format.
//!
//! The block codecs carry no framing of their own: the stored-raw sentinel
//! only works if the caller persists both the compressed and the original
//! size next to the payload.  This module is that caller.  A `.bpk` file is
//! a single block:
//!
//! ```text
//! magic            u32 LE   0x314B5042 ("BPK1")
//! scheme           u8       1 = LZ, 2 = RLE
//! content_size     u32 LE   original size
//! compressed_size  u32 LE   payload size (== content_size → stored raw)
//! checksum         u32 LE   XXH32 of the original content, seed 0
//! payload          compressed_size bytes
//! ```
//!
//! There is no multi-block mode; inputs larger than `u32::MAX` bytes are
//! rejected rather than split.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context};

use crate::block::{compress_bound, compress_lz, compress_rle, decompress_lz, decompress_rle};
use crate::displaylevel;
use crate::xxhash::xxh32_oneshot;

// ── Container constants ───────────────────────────────────────────────────────

/// Container magic number — the bytes `B P K 1` read as little-endian u32.
pub const BPK_MAGICNUMBER: u32 = 0x314B_5042;

/// Total header size: magic + scheme + content size + compressed size + checksum.
pub const HEADER_SIZE: usize = 4 + 1 + 4 + 4 + 4;

// ── Scheme ────────────────────────────────────────────────────────────────────

/// Compression scheme recorded in the container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Greedy dictionary-match codec.
    Lz,
    /// Run-length codec.
    Rle,
}

impl Scheme {
    fn to_byte(self) -> u8 {
        match self {
            Scheme::Lz => 1,
            Scheme::Rle => 2,
        }
    }

    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Scheme::Lz),
            2 => Some(Scheme::Rle),
            _ => None,
        }
    }

    /// Human-readable scheme name for `--list` output.
    pub fn label(self) -> &'static str {
        match self {
            Scheme::Lz => "lz",
            Scheme::Rle => "rle",
        }
    }
}

// ── Public result types ───────────────────────────────────────────────────────

/// Byte-count statistics produced by a successful operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileResult {
    /// Bytes read from the source file.
    pub bytes_read: u64,
    /// Bytes written to the destination file (including the header).
    pub bytes_written: u64,
}

/// Header metadata of a `.bpk` file, as printed by `--list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerInfo {
    pub scheme: Scheme,
    pub content_size: u32,
    pub compressed_size: u32,
    pub checksum: u32,
}

impl ContainerInfo {
    /// `true` when the payload was stored verbatim.
    pub fn stored_raw(&self) -> bool {
        self.compressed_size == self.content_size
    }
}

// ── Header encode / decode ────────────────────────────────────────────────────

fn write_header(info: &ContainerInfo, dst: &mut Vec<u8>) {
    dst.extend_from_slice(&BPK_MAGICNUMBER.to_le_bytes());
    dst.push(info.scheme.to_byte());
    dst.extend_from_slice(&info.content_size.to_le_bytes());
    dst.extend_from_slice(&info.compressed_size.to_le_bytes());
    dst.extend_from_slice(&info.checksum.to_le_bytes());
}

fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Parse and validate a container header.
///
/// Checks the magic number, the scheme byte, and that the recorded
/// compressed size matches the payload actually present after the header.
pub fn parse_header(file: &[u8]) -> anyhow::Result<ContainerInfo> {
    if file.len() < HEADER_SIZE {
        bail!("not a bpack file: shorter than the container header");
    }
    let magic = read_u32_le(&file[0..4]);
    if magic != BPK_MAGICNUMBER {
        bail!("not a bpack file: bad magic number 0x{:08X}", magic);
    }
    let scheme = Scheme::from_byte(file[4])
        .ok_or_else(|| anyhow!("unsupported scheme byte {}", file[4]))?;
    let info = ContainerInfo {
        scheme,
        content_size: read_u32_le(&file[5..9]),
        compressed_size: read_u32_le(&file[9..13]),
        checksum: read_u32_le(&file[13..17]),
    };
    let payload = file.len() - HEADER_SIZE;
    if payload as u64 != info.compressed_size as u64 {
        bail!(
            "corrupt container: header says {} payload bytes, file has {}",
            info.compressed_size,
            payload
        );
    }
    if info.compressed_size > info.content_size {
        bail!("corrupt container: compressed size exceeds content size");
    }
    Ok(info)
}

// ── Compression ───────────────────────────────────────────────────────────────

/// Compress `input` into the `.bpk` container at `output`.
pub fn compress_file(input: &Path, output: &Path, scheme: Scheme) -> anyhow::Result<FileResult> {
    let content = fs::read(input)
        .with_context(|| format!("cannot read input file {}", input.display()))?;
    if content.len() as u64 > u32::MAX as u64 {
        bail!(
            "{}: file too large for the single-block container ({} bytes)",
            input.display(),
            content.len()
        );
    }

    let mut payload = vec![0u8; compress_bound(content.len())];
    let compressed_size = match scheme {
        Scheme::Lz => compress_lz(&content, &mut payload),
        Scheme::Rle => compress_rle(&content, &mut payload),
    };

    let info = ContainerInfo {
        scheme,
        content_size: content.len() as u32,
        compressed_size: compressed_size as u32,
        checksum: xxh32_oneshot(&content, 0),
    };

    let mut out = Vec::with_capacity(HEADER_SIZE + compressed_size);
    write_header(&info, &mut out);
    out.extend_from_slice(&payload[..compressed_size]);
    fs::write(output, &out)
        .with_context(|| format!("cannot write output file {}", output.display()))?;

    let ratio = if content.is_empty() {
        100.0
    } else {
        compressed_size as f64 * 100.0 / content.len() as f64
    };
    displaylevel!(
        2,
        "Compressed {} bytes into {} ({:.2}%){}\n",
        content.len(),
        compressed_size,
        ratio,
        if info.stored_raw() { " (stored raw)" } else { "" }
    );

    Ok(FileResult {
        bytes_read: content.len() as u64,
        bytes_written: out.len() as u64,
    })
}

// ── Decompression ─────────────────────────────────────────────────────────────

/// Decompress the `.bpk` container at `input`.
///
/// `output` of `None` selects test mode: the payload is decoded and the
/// checksum verified, but nothing is written.
pub fn decompress_file(input: &Path, output: Option<&Path>) -> anyhow::Result<FileResult> {
    let file = fs::read(input)
        .with_context(|| format!("cannot read input file {}", input.display()))?;
    let info = parse_header(&file)?;
    let payload = &file[HEADER_SIZE..];

    let mut content = vec![0u8; info.content_size as usize];
    let decoded = match info.scheme {
        Scheme::Lz => decompress_lz(payload, &mut content),
        Scheme::Rle => decompress_rle(payload, &mut content),
    };
    decoded.map_err(|e| anyhow!("{}: corrupt payload ({:?})", input.display(), e))?;

    let checksum = xxh32_oneshot(&content, 0);
    if checksum != info.checksum {
        bail!(
            "{}: checksum mismatch (header 0x{:08X}, content 0x{:08X})",
            input.display(),
            info.checksum,
            checksum
        );
    }

    let mut bytes_written = 0u64;
    if let Some(output) = output {
        fs::write(output, &content)
            .with_context(|| format!("cannot write output file {}", output.display()))?;
        bytes_written = content.len() as u64;
        displaylevel!(2, "Decompressed {} bytes \n", content.len());
    } else {
        displaylevel!(2, "{}: OK ({} bytes) \n", input.display(), content.len());
    }

    Ok(FileResult {
        bytes_read: file.len() as u64,
        bytes_written,
    })
}

// ── File info (--list) ────────────────────────────────────────────────────────

/// Read and return the container metadata of `input` without decoding it.
pub fn file_info(input: &Path) -> anyhow::Result<ContainerInfo> {
    let file = fs::read(input)
        .with_context(|| format!("cannot read input file {}", input.display()))?;
    parse_header(&file)
}

/// Print `--list` metadata for `input` to stdout.
pub fn display_file_info(input: &Path) -> anyhow::Result<()> {
    let info = file_info(input)?;
    let ratio = if info.content_size == 0 {
        100.0
    } else {
        info.compressed_size as f64 * 100.0 / info.content_size as f64
    };
    println!("Scheme     Compressed   Uncompressed   Ratio    Check      Filename");
    println!(
        "{:<10} {:<12} {:<14} {:<8} 0x{:08X} {}",
        if info.stored_raw() { "raw" } else { info.scheme.label() },
        info.compressed_size,
        info.content_size,
        format!("{:.2}%", ratio),
        info.checksum,
        input.display()
    );
    Ok(())
}
