//! Double Array File format module for reading SPICE DAF kernels
//!
//! This module validates and parses the fixed-layout DAF container used by the
//! `de440s.bsp` planetary kernel: the file record, the chain of summary records
//! and the raw segment summaries. Segment semantics live in [`crate::jplephem::spk`].

use std::collections::HashSet;
use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, warn};
use memmap2::Mmap;
use sha2::{Digest, Sha512};

use crate::jplephem::errors::{format_err, io_err, JplephemError, Result};

/// Size of a DAF record (bytes)
pub const RECORD_SIZE: usize = 1024;
/// Size of a double-precision value (bytes)
pub const DOUBLE_SIZE: usize = 8;
/// Identification word of an SPK kernel
pub const SPK_LOCIDW: &str = "DAF/SPK";
/// Binary format tag for little-endian IEEE doubles
pub const LTL_IEEE: &str = "LTL-IEEE";
/// Binary format tag for big-endian IEEE doubles
pub const BIG_IEEE: &str = "BIG-IEEE";
/// Number of double components in each SPK summary
pub const SPK_ND: u32 = 2;
/// Number of integer components in each SPK summary
pub const SPK_NI: u32 = 6;
/// FTP corruption detection string
pub const FTPSTR: &[u8] = b"FTPSTR:\r:\n:\r\n:\r\x00:\x81:\x10\xce:ENDFTP";
/// Byte offset of the FTP validation string in the file record
pub const FTPSTR_OFFSET: usize = 699;

/// File name of the supported kernel
pub const DE440S_FILENAME: &str = "de440s.bsp";
/// Exact length of `de440s.bsp` in bytes
pub const DE440S_LENGTH: usize = 32_726_016;
/// SHA-512 of `de440s.bsp` (lowercase hex)
pub const DE440S_SHA512: &str = "a244335d9eddc1e4fd2f3f8ddabf360020f650bc8fca2c4e7e0f66018db7fd2691dd63f52e3652653e096d97ad74cd48c10b4587a4d5a9bb68dbae5cecf06449";

// Control area of a summary record: NEXT, PREV, NSUM as doubles
const SUMMARY_CONTROL_SIZE: usize = 3 * DOUBLE_SIZE;

/// DAF file endianness, from the LOCFMT tag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

impl Endian {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            LTL_IEEE => Some(Endian::Little),
            BIG_IEEE => Some(Endian::Big),
            _ => None,
        }
    }
}

/// Expected length and digest of a kernel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integrity {
    /// Exact byte length
    pub length: usize,
    /// SHA-512 of the whole file, lowercase hex
    pub sha512: String,
}

impl Integrity {
    /// Pinned expectation for `de440s.bsp`
    pub fn de440s() -> Self {
        Self {
            length: DE440S_LENGTH,
            sha512: DE440S_SHA512.to_string(),
        }
    }

    /// Build an expectation matching the given bytes exactly
    pub fn of(bytes: &[u8]) -> Self {
        Self {
            length: bytes.len(),
            sha512: sha512_hex(bytes),
        }
    }

    /// Check length first, then the digest
    pub fn verify(&self, bytes: &[u8]) -> Result<()> {
        if bytes.len() != self.length {
            return Err(JplephemError::IntegrityError(format!(
                "expected {} bytes, got {}",
                self.length,
                bytes.len()
            )));
        }

        let actual = sha512_hex(bytes);
        if !actual.eq_ignore_ascii_case(&self.sha512) {
            return Err(JplephemError::IntegrityError(format!(
                "SHA-512 mismatch: expected {}, got {}",
                self.sha512, actual
            )));
        }

        Ok(())
    }
}

impl Default for Integrity {
    fn default() -> Self {
        Self::de440s()
    }
}

/// Lowercase hex SHA-512 of a byte slice
pub fn sha512_hex(bytes: &[u8]) -> String {
    let digest = Sha512::digest(bytes);
    format!("{:x}", digest)
}

/// Raw kernel bytes, either owned or memory-mapped read-only
pub enum KernelBytes {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for KernelBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            KernelBytes::Owned(v) => v,
            KernelBytes::Mapped(m) => m,
        }
    }
}

impl From<Vec<u8>> for KernelBytes {
    fn from(v: Vec<u8>) -> Self {
        KernelBytes::Owned(v)
    }
}

impl std::fmt::Debug for KernelBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelBytes::Owned(v) => write!(f, "Owned({} bytes)", v.len()),
            KernelBytes::Mapped(m) => write!(f, "Mapped({} bytes)", m.len()),
        }
    }
}

/// Parsed file record (record 1)
#[derive(Debug, Clone, PartialEq)]
pub struct FileHeader {
    /// Identification word, `DAF/SPK`
    pub locidw: String,
    /// Number of double-precision components in each summary
    pub nd: u32,
    /// Number of integer components in each summary
    pub ni: u32,
    /// Internal file description
    pub locifn: String,
    /// Record number of the first summary record
    pub fward: u32,
    /// Record number of the last summary record
    pub bward: u32,
    /// First free word address
    pub free: u32,
    /// Byte order of the doubles in the file
    pub endian: Endian,
}

/// One node of the summary record chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRecord {
    /// 1-based record number of this summary record
    pub record_number: usize,
    /// Next summary record (0 terminates the chain)
    pub next: usize,
    /// Previous summary record (0 for the first)
    pub prev: usize,
    /// Number of summaries held by this record
    pub n_summaries: usize,
}

/// A raw array summary: ND doubles, NI integers and the array name
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub name: String,
    pub doubles: Vec<f64>,
    pub ints: Vec<i32>,
}

/// Double Array File (DAF) reader over an in-memory buffer
#[derive(Debug)]
pub struct DAF {
    bytes: KernelBytes,
    /// Parsed file record
    pub header: FileHeader,
    /// Summary records in chain order
    pub records: Vec<SummaryRecord>,
    /// All summaries in chain order
    pub summaries: Vec<Summary>,
}

impl DAF {
    /// Verify `bytes` against `integrity`, then parse the DAF structure
    pub fn load(bytes: KernelBytes, integrity: &Integrity) -> Result<Self> {
        integrity.verify(&bytes)?;
        Self::parse(bytes)
    }

    /// Memory-map the file at `path` and load it
    pub fn open<P: AsRef<Path>>(path: P, integrity: &Integrity) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| io_err(path, e))?;

        // The map is read-only and the kernel is never written while loaded.
        let map = unsafe { Mmap::map(&file) }.map_err(|e| io_err(path, e))?;
        debug!("mapped {} ({} bytes)", path.display(), map.len());

        Self::load(KernelBytes::Mapped(map), integrity)
    }

    /// Parse the file record and the summary chain, without integrity checks
    pub(crate) fn parse(bytes: KernelBytes) -> Result<Self> {
        if bytes.len() < RECORD_SIZE || bytes.len() % RECORD_SIZE != 0 {
            return Err(format_err(format!(
                "file length {} is not a whole number of {}-byte records",
                bytes.len(),
                RECORD_SIZE
            )));
        }

        let header = read_header(&bytes[..RECORD_SIZE])?;
        debug!(
            "DAF header: locidw={}, nd={}, ni={}, fward={}, bward={}, free={}, locifn={}",
            header.locidw,
            header.nd,
            header.ni,
            header.fward,
            header.bward,
            header.free,
            header.locifn
        );

        let mut daf = DAF {
            bytes,
            header,
            records: Vec::new(),
            summaries: Vec::new(),
        };
        daf.walk_summaries()?;

        Ok(daf)
    }

    /// Total number of 1024-byte records in the file
    pub fn record_count(&self) -> usize {
        self.bytes.len() / RECORD_SIZE
    }

    /// Length of the underlying buffer in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer is empty (never true for a parsed file)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Length of the file in 8-byte words
    pub fn word_count(&self) -> usize {
        self.bytes.len() / DOUBLE_SIZE
    }

    /// Borrow a record (1-indexed)
    pub fn record(&self, record_number: usize) -> Result<&[u8]> {
        if record_number < 1 || record_number > self.record_count() {
            return Err(format_err(format!(
                "record {} outside file of {} records",
                record_number,
                self.record_count()
            )));
        }
        let offset = (record_number - 1) * RECORD_SIZE;
        Ok(&self.bytes[offset..offset + RECORD_SIZE])
    }

    /// Read the double at a 1-based word address
    ///
    /// Callers validate addresses against [`DAF::word_count`] up front.
    #[inline]
    pub fn word(&self, address: usize) -> f64 {
        let offset = (address - 1) * DOUBLE_SIZE;
        LittleEndian::read_f64(&self.bytes[offset..offset + DOUBLE_SIZE])
    }

    /// Copy the words `start..=end` (1-based, inclusive) into `out`
    pub fn read_words_into(&self, start: usize, end: usize, out: &mut Vec<f64>) -> Result<()> {
        if start < 1 || end < start || end > self.word_count() {
            return Err(format_err(format!(
                "invalid array bounds: start={}, end={}, words={}",
                start,
                end,
                self.word_count()
            )));
        }

        let bytes = &self.bytes[(start - 1) * DOUBLE_SIZE..end * DOUBLE_SIZE];
        out.clear();
        out.extend(bytes.chunks_exact(DOUBLE_SIZE).map(LittleEndian::read_f64));
        Ok(())
    }

    /// Read the words `start..=end` (1-based, inclusive)
    pub fn read_array(&self, start: usize, end: usize) -> Result<Vec<f64>> {
        let mut out = Vec::with_capacity(end.saturating_sub(start) + 1);
        self.read_words_into(start, end, &mut out)?;
        Ok(out)
    }

    /// Read comments from the comment area (records 2..FWARD)
    pub fn comments(&self) -> String {
        let last = (self.header.fward as usize).min(self.record_count() + 1);
        let mut text = String::new();

        for record_number in 2..last {
            let Ok(record) = self.record(record_number) else {
                break;
            };
            // Comment lines are NUL-terminated; EOT (0x04) ends the area.
            let end = record.iter().position(|&b| b == 0x04);
            let chunk = &record[..end.unwrap_or(record.len())];
            text.push_str(&String::from_utf8_lossy(chunk).replace('\0', "\n"));
            if end.is_some() {
                break;
            }
        }

        text.trim_end().to_string()
    }

    /// Size of one summary in 8-byte words
    fn summary_length(&self) -> usize {
        self.header.nd as usize + (self.header.ni as usize + 1) / 2
    }

    /// Walk the summary record chain into explicit vectors
    ///
    /// The walk is bounded by the number of records in the file and rejects any
    /// record visited twice.
    fn walk_summaries(&mut self) -> Result<()> {
        let total_records = self.record_count();
        let summary_step = self.summary_length() * DOUBLE_SIZE;
        let max_summaries = (RECORD_SIZE - SUMMARY_CONTROL_SIZE) / summary_step;

        let mut visited = HashSet::new();
        let mut records = Vec::new();
        let mut summaries = Vec::new();
        let mut record_number = self.header.fward as usize;

        while record_number != 0 {
            if records.len() >= total_records {
                return Err(format_err("summary record chain longer than the file"));
            }
            if record_number < 2 || record_number >= total_records {
                return Err(format_err(format!(
                    "summary record link {} outside file of {} records",
                    record_number, total_records
                )));
            }
            if !visited.insert(record_number) {
                return Err(format_err(format!(
                    "cycle in summary record chain at record {}",
                    record_number
                )));
            }

            let summary_data = self.record(record_number)?;
            // The name record immediately follows its summary record
            let name_data = self.record(record_number + 1)?;

            let next = control_value(summary_data, 0, "NEXT")?;
            let prev = control_value(summary_data, 1, "PREV")?;
            let n_summaries = control_value(summary_data, 2, "NSUM")?;

            debug!(
                "summary record {}: NEXT={}, PREV={}, NSUM={}",
                record_number, next, prev, n_summaries
            );

            if n_summaries > max_summaries {
                return Err(format_err(format!(
                    "summary record {} declares {} summaries, at most {} fit",
                    record_number, n_summaries, max_summaries
                )));
            }

            for i in 0..n_summaries {
                let start = SUMMARY_CONTROL_SIZE + i * summary_step;
                let doubles = (0..self.header.nd as usize)
                    .map(|j| {
                        let pos = start + j * DOUBLE_SIZE;
                        LittleEndian::read_f64(&summary_data[pos..pos + DOUBLE_SIZE])
                    })
                    .collect();

                // Integers are packed two per double after the ND doubles
                let int_start = start + self.header.nd as usize * DOUBLE_SIZE;
                let ints = (0..self.header.ni as usize)
                    .map(|j| {
                        let pos = int_start + j * 4;
                        LittleEndian::read_i32(&summary_data[pos..pos + 4])
                    })
                    .collect();

                let name_start = i * summary_step;
                let raw = &name_data[name_start..name_start + summary_step];
                let name = String::from_utf8_lossy(raw)
                    .trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
                    .to_string();

                summaries.push(Summary {
                    name,
                    doubles,
                    ints,
                });
            }

            records.push(SummaryRecord {
                record_number,
                next,
                prev,
                n_summaries,
            });
            record_number = next;
        }

        if summaries.is_empty() {
            warn!("DAF contains no array summaries");
        }

        self.records = records;
        self.summaries = summaries;
        Ok(())
    }
}

/// Parse and validate the file record
fn read_header(header: &[u8]) -> Result<FileHeader> {
    let locidw = fixed_str(&header[0..8]);
    if locidw != SPK_LOCIDW {
        return Err(format_err(format!(
            "identification word {:?}, expected {:?}",
            locidw, SPK_LOCIDW
        )));
    }

    let locfmt = fixed_str(&header[88..96]);
    let endian = Endian::from_tag(&locfmt)
        .ok_or_else(|| format_err(format!("unknown binary format tag {:?}", locfmt)))?;
    if endian != Endian::Little {
        return Err(format_err(format!(
            "binary format {:?} is not supported, expected {:?}",
            locfmt, LTL_IEEE
        )));
    }

    if &header[FTPSTR_OFFSET..FTPSTR_OFFSET + FTPSTR.len()] != FTPSTR {
        return Err(format_err("FTP validation string damaged"));
    }

    let nd = LittleEndian::read_u32(&header[8..12]);
    let ni = LittleEndian::read_u32(&header[12..16]);
    if nd != SPK_ND || ni != SPK_NI {
        return Err(format_err(format!(
            "summary format ND={}, NI={}, expected ND={}, NI={}",
            nd, ni, SPK_ND, SPK_NI
        )));
    }

    Ok(FileHeader {
        locidw,
        nd,
        ni,
        locifn: fixed_str(&header[16..76]),
        fward: LittleEndian::read_u32(&header[76..80]),
        bward: LittleEndian::read_u32(&header[80..84]),
        free: LittleEndian::read_u32(&header[84..88]),
        endian,
    })
}

/// Fixed-width ASCII field, trailing blanks and NULs removed
fn fixed_str(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(|c: char| c == '\0' || c == ' ')
        .to_string()
}

/// Read one of the NEXT/PREV/NSUM control doubles as a count
fn control_value(record: &[u8], index: usize, what: &str) -> Result<usize> {
    let pos = index * DOUBLE_SIZE;
    let value = LittleEndian::read_f64(&record[pos..pos + DOUBLE_SIZE]);
    if !(value >= 0.0 && value.fract() == 0.0 && value < u32::MAX as f64) {
        return Err(format_err(format!("summary control {} = {} is not a count", what, value)));
    }
    Ok(value as usize)
}
