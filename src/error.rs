use std::io;

use displaydoc::Display;
use thiserror::Error;

/// Reasons a boot sector cannot be turned into volume geometry
#[derive(Debug, Display, Error, Eq, PartialEq)]
pub enum BootError {
    /// boot sector needs 512 bytes, got {0}
    Truncated(usize),
    /// not an exFAT boot sector
    NotExFAT,
    /// boot signature {0:02X?} is not 55 AA
    Signature([u8; 2]),
    /// bytes per sector shift {0} out of range 9..=12
    SectorSizeShift(u8),
    /// sectors per cluster shift {cluster_shift} exceeds {max}
    ClusterSizeShift { cluster_shift: u8, max: u8 },
    /// number of FATs {0} is neither 1 nor 2
    NumberOfFats(u8),
    /// FAT offset {0} lies inside the 24 boot region sectors
    FatOffset(u32),
    /// cluster heap offset {heap_offset} does not follow FAT region ending at sector {fat_end}
    ClusterHeapOffset { heap_offset: u32, fat_end: u64 },
    /// cluster count is zero
    ClusterCount,
}

#[derive(Debug, Display, Error, Eq, PartialEq)]
pub enum LayoutError {
    /// cluster {cluster} with count {count} out of range, volume has {cluster_count} clusters
    ClusterOutOfRange { cluster: u32, count: u64, cluster_count: u32 },
    /// address of {count} units from index {index} overflows
    AddressOverflow { index: u64, count: u64 },
}

/// Failures of the offset stream produced by a byte-level comparison
#[derive(Debug, Display, Error)]
pub enum OracleError {
    /// malformed line {line}: {text:?}
    Malformed { line: u64, text: String },
    /// offset {offset} does not follow {previous}
    OutOfOrder { previous: u64, offset: u64 },
    /// images differ in length, one ended at byte {0}
    LengthMismatch(u64),
    /// {0}
    IO(#[from] io::Error),
}

#[derive(Copy, Clone, Debug, derive_more::Display, Eq, PartialEq)]
pub enum Operation {
    #[display("read")]
    Read,
    #[display("write")]
    Write,
}

#[derive(Debug, Display, Error)]
pub enum Error {
    /// malformed boot sector: {0}
    MalformedBootSector(#[from] BootError),
    /// boot sectors differ at byte {offset}
    GeometryMismatch { offset: usize },
    /// image sizes differ ({old} != {new})
    SizeMismatch { old: u64, new: u64 },
    /// {0}
    Layout(#[from] LayoutError),
    /// incomplete {op} at byte {offset:#x}: {actual} of {expected} bytes
    IncompleteTransfer { op: Operation, offset: u64, expected: usize, actual: usize },
    /// {op} at byte {offset:#x}: {source}
    Transfer {
        op: Operation,
        offset: u64,
        #[source]
        source: io::Error,
    },
    /// buffer of {actual} bytes cannot hold {expected} bytes
    BufferTooSmall { expected: usize, actual: usize },
    /// boot checksum mismatch, expect {expected:08X} actual {actual:08X}
    Checksum { expected: u32, actual: u32 },
    /// diff stream: {0}
    Oracle(#[from] OracleError),
    /// {0}
    IO(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
