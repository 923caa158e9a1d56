use derive_more::{Display, From, Into};

#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Ord, PartialOrd, PartialEq)]
pub struct SectorID(u64);

impl SectorID {
    pub const BOOT: Self = Self(0);
}

#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Ord, PartialOrd, PartialEq)]
pub struct ClusterID(u32);

impl ClusterID {
    /// Cluster 0 and 1 are reserved, the heap starts at cluster 2
    pub const FIRST: Self = Self(2);

    pub fn valid(&self) -> bool {
        self.0 >= Self::FIRST.0
    }

    /// Index relative to the start of cluster heap
    pub(crate) fn offset(self) -> u32 {
        self.0 - Self::FIRST.0
    }
}

/// Contiguous span of an image, in bytes
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
#[display("{start:#x}+{length:#x}")]
pub struct ByteRange {
    pub start: u64,
    pub length: u64,
}

impl ByteRange {
    /// Exclusive end
    pub fn end(&self) -> u64 {
        self.start + self.length
    }
}
