use std::io::Result as IOResult;

use crate::error::{Error, Operation, Result};
use crate::geometry::VolumeGeometry;
use crate::io;
use crate::layout::{cluster_to_byte_range, sector_to_byte_range};
use crate::region::boot::{BootChecksum, BootSector, VolumeFlags, BOOT_SECTOR_SIZE, CHECKSUM_SECTOR};
use crate::types::{ByteRange, ClusterID, SectorID};

fn transferred(op: Operation, offset: u64, expected: usize, result: IOResult<usize>) -> Result<usize> {
    let actual = result.map_err(|source| Error::Transfer { op, offset, source })?;
    if actual != expected {
        return Err(Error::IncompleteTransfer { op, offset, expected, actual });
    }
    Ok(actual)
}

fn fit(range: &ByteRange, actual: usize) -> Result<usize> {
    match usize::try_from(range.length) {
        Ok(expected) if expected <= actual => Ok(expected),
        Ok(expected) => Err(Error::BufferTooSmall { expected, actual }),
        Err(_) => Err(Error::BufferTooSmall { expected: usize::MAX, actual }),
    }
}

/// An exFAT image opened for raw sector and cluster access
///
/// Buffers are owned by the caller and must hold at least `count` units,
/// only the leading `count` units of a buffer are touched.
pub struct Image<IO> {
    io: IO,
    geometry: VolumeGeometry,
    volume_flags: VolumeFlags,
    boot_sector: Vec<u8>,
}

impl<IO: io::IO> Image<IO> {
    /// Reads and decodes the main boot sector
    pub fn open(mut io: IO) -> Result<Self> {
        let mut boot_sector = vec![0u8; BOOT_SECTOR_SIZE];
        let result = io.read_at(0, &mut boot_sector);
        transferred(Operation::Read, 0, BOOT_SECTOR_SIZE, result)?;
        let decoded = BootSector::from_bytes(&boot_sector)?;
        let geometry = VolumeGeometry::from_boot_sector(&decoded)?;
        let volume_flags = decoded.volume_flags();
        let sector_size = geometry.sector_size() as usize;
        if sector_size > BOOT_SECTOR_SIZE {
            boot_sector.resize(sector_size, 0);
            let offset = BOOT_SECTOR_SIZE as u64;
            let result = io.read_at(offset, &mut boot_sector[BOOT_SECTOR_SIZE..]);
            transferred(Operation::Read, offset, sector_size - BOOT_SECTOR_SIZE, result)?;
        }
        Ok(Self { io, geometry, volume_flags, boot_sector })
    }

    pub fn geometry(&self) -> &VolumeGeometry {
        &self.geometry
    }

    /// Flags as read when the image was opened
    pub fn volume_flags(&self) -> VolumeFlags {
        self.volume_flags
    }

    /// Whole first sector, including bytes after the 512 byte structure
    pub fn boot_sector(&self) -> &[u8] {
        &self.boot_sector
    }

    pub fn size(&mut self) -> Result<u64> {
        Ok(self.io.size()?)
    }

    fn get(&mut self, range: ByteRange, buf: &mut [u8]) -> Result<usize> {
        let length = fit(&range, buf.len())?;
        let result = self.io.read_at(range.start, &mut buf[..length]);
        transferred(Operation::Read, range.start, length, result)
    }

    fn set(&mut self, range: ByteRange, data: &[u8]) -> Result<usize> {
        let length = fit(&range, data.len())?;
        let result = self.io.write_at(range.start, &data[..length]);
        transferred(Operation::Write, range.start, length, result)
    }

    pub fn get_sectors(&mut self, sector: SectorID, count: u64, buf: &mut [u8]) -> Result<usize> {
        let range = sector_to_byte_range(&self.geometry, sector, count)?;
        trace!("Get sector {} count {} at {}", sector, count, range);
        self.get(range, buf)
    }

    pub fn get_sector(&mut self, sector: SectorID, buf: &mut [u8]) -> Result<usize> {
        self.get_sectors(sector, 1, buf)
    }

    pub fn set_sectors(&mut self, sector: SectorID, count: u64, data: &[u8]) -> Result<usize> {
        let range = sector_to_byte_range(&self.geometry, sector, count)?;
        trace!("Set sector {} count {} at {}", sector, count, range);
        self.set(range, data)
    }

    pub fn set_sector(&mut self, sector: SectorID, data: &[u8]) -> Result<usize> {
        self.set_sectors(sector, 1, data)
    }

    pub fn get_clusters(&mut self, cluster: ClusterID, count: u64, buf: &mut [u8]) -> Result<usize> {
        let range = cluster_to_byte_range(&self.geometry, cluster, count)?;
        trace!("Get cluster {} count {} at {}", cluster, count, range);
        self.get(range, buf)
    }

    pub fn get_cluster(&mut self, cluster: ClusterID, buf: &mut [u8]) -> Result<usize> {
        self.get_clusters(cluster, 1, buf)
    }

    pub fn set_clusters(&mut self, cluster: ClusterID, count: u64, data: &[u8]) -> Result<usize> {
        let range = cluster_to_byte_range(&self.geometry, cluster, count)?;
        trace!("Set cluster {} count {} at {}", cluster, count, range);
        self.set(range, data)
    }

    pub fn set_cluster(&mut self, cluster: ClusterID, data: &[u8]) -> Result<usize> {
        self.set_clusters(cluster, 1, data)
    }

    pub fn flush(&mut self) -> Result<()> {
        Ok(self.io.flush()?)
    }

    /// Checks the main boot region against its checksum sector
    pub fn validate_checksum(&mut self) -> Result<()> {
        let mut sector = vec![0u8; self.geometry.sector_size() as usize];
        let mut checksum = BootChecksum::default();
        for index in 0..CHECKSUM_SECTOR {
            self.get_sector(SectorID::from(index), &mut sector)?;
            checksum.write(index as usize, &sector);
        }
        self.get_sector(SectorID::from(CHECKSUM_SECTOR), &mut sector)?;
        for word in sector.chunks_exact(4) {
            let actual = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
            if actual != checksum.sum() {
                return Err(Error::Checksum { expected: checksum.sum(), actual });
            }
        }
        Ok(())
    }

    pub fn into_inner(self) -> IO {
        self.io
    }
}
