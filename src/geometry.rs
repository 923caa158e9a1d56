use crate::error::BootError;
use crate::region::boot::{BootSector, BOOT_REGION_SECTORS};

/// Physical layout of one volume, decoded from its main boot sector
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VolumeGeometry {
    sector_size_shift: u8,
    cluster_sectors_shift: u8,
    fat_offset: u32,
    fat_length: u32,
    number_of_fats: u8,
    cluster_heap_offset: u32,
    cluster_count: u32,
    volume_length: u64,
}

impl VolumeGeometry {
    /// Decode from the leading bytes of an image, at least 512 bytes required
    pub fn decode(bytes: &[u8]) -> Result<Self, BootError> {
        let boot_sector = BootSector::from_bytes(bytes)?;
        Self::from_boot_sector(&boot_sector)
    }

    pub fn sector_size_shift(&self) -> u8 {
        self.sector_size_shift
    }

    pub fn cluster_sectors_shift(&self) -> u8 {
        self.cluster_sectors_shift
    }

    pub fn cluster_size_shift(&self) -> u8 {
        self.sector_size_shift + self.cluster_sectors_shift
    }

    /// 512 ~ 4096
    pub fn sector_size(&self) -> u32 {
        1 << self.sector_size_shift
    }

    pub fn sectors_per_cluster(&self) -> u32 {
        1 << self.cluster_sectors_shift
    }

    /// At most 32MiB
    pub fn cluster_size(&self) -> u32 {
        1 << self.cluster_size_shift()
    }

    pub fn fat_offset_sectors(&self) -> u32 {
        self.fat_offset
    }

    pub fn fat_length_sectors(&self) -> u32 {
        self.fat_length
    }

    pub fn number_of_fats(&self) -> u8 {
        self.number_of_fats
    }

    pub fn cluster_heap_offset_sectors(&self) -> u32 {
        self.cluster_heap_offset
    }

    /// Valid cluster indices are `2..cluster_count + 2`
    pub fn cluster_count(&self) -> u32 {
        self.cluster_count
    }

    pub fn volume_length_sectors(&self) -> u64 {
        self.volume_length
    }

    pub(crate) fn from_boot_sector(boot_sector: &BootSector) -> Result<Self, BootError> {
        let sector_size_shift = boot_sector.bytes_per_sector_shift;
        if !(9..=12).contains(&sector_size_shift) {
            return Err(BootError::SectorSizeShift(sector_size_shift));
        }
        let cluster_sectors_shift = boot_sector.sectors_per_cluster_shift;
        let max = 25 - sector_size_shift;
        if cluster_sectors_shift > max {
            return Err(BootError::ClusterSizeShift { cluster_shift: cluster_sectors_shift, max });
        }
        let number_of_fats = boot_sector.number_of_fats;
        if !(1..=2).contains(&number_of_fats) {
            return Err(BootError::NumberOfFats(number_of_fats));
        }
        let fat_offset = boot_sector.fat_offset.to_ne();
        if fat_offset < BOOT_REGION_SECTORS {
            return Err(BootError::FatOffset(fat_offset));
        }
        let fat_length = boot_sector.fat_length.to_ne();
        let heap_offset = boot_sector.cluster_heap_offset.to_ne();
        let fat_end = fat_offset as u64 + fat_length as u64 * number_of_fats as u64;
        if heap_offset <= fat_offset || (heap_offset as u64) < fat_end {
            return Err(BootError::ClusterHeapOffset { heap_offset, fat_end });
        }
        let cluster_count = boot_sector.cluster_count.to_ne();
        if cluster_count == 0 {
            return Err(BootError::ClusterCount);
        }
        let geometry = Self {
            sector_size_shift,
            cluster_sectors_shift,
            fat_offset,
            fat_length,
            number_of_fats,
            cluster_heap_offset: heap_offset,
            cluster_count,
            volume_length: boot_sector.volume_length.to_ne(),
        };
        debug!("Volume geometry {:?}", geometry);
        Ok(geometry)
    }
}
