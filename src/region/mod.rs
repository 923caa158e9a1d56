use derive_more::Display;

/// Boot region, volume configuration parameters
/// 24 sectors, 12 sectors for main and 12 sectors for backup
pub(crate) mod boot;

/// Structural area of an exFAT volume a byte belongs to
///
/// Regions are ordered as they appear on disk
#[derive(Copy, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Region {
    /// Boot sectors, OEM parameters and checksum, both main and backup
    #[display("Boot")]
    Boot,
    /// From fat-offset up to the cluster heap, covering every FAT
    /// and any alignment padding in between
    #[display("FAT")]
    Fat,
    /// Cluster heap
    #[display("DATA")]
    Data,
}

impl Region {
    pub const ALL: [Self; 3] = [Self::Boot, Self::Fat, Self::Data];
}
