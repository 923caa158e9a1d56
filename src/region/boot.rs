// Main boot sector of the boot region

use core::mem;

use bitfield::bitfield;
use memoffset::offset_of;

use crate::endian::Little as LE;
use crate::error::BootError;

/// Main and backup boot region, 12 sectors each
pub(crate) const BOOT_REGION_SECTORS: u32 = 24;
/// Sector holding the repeated boot checksum, relative to each boot region
pub(crate) const CHECKSUM_SECTOR: u64 = 11;
pub(crate) const BOOT_SECTOR_SIZE: usize = 512;

bitfield! {
    #[derive(Copy, Clone, Debug, Default)]
    pub struct VolumeFlags(u16);
    pub clear_to_zero, _: 3, 3;
    pub media_failure, _: 2, 2;
    pub volume_dirty, _: 1, 1;
    pub active_fat, _: 0, 0;
}

#[derive(Copy, Clone, Debug)]
#[repr(C)]
pub(crate) struct BootSector {
    pub jump_boot: [u8; 3],
    pub filesystem_name: [u8; 8],
    _must_be_zero: [u8; 53],
    pub partition_offset: LE<u64>, // shall ignore when 0
    pub volume_length: LE<u64>,    // unit sector
    pub fat_offset: LE<u32>,          // unit sector
    pub fat_length: LE<u32>,          // unit sector
    pub cluster_heap_offset: LE<u32>, // unit sector
    pub cluster_count: LE<u32>,
    pub first_cluster_of_root_directory: LE<u32>,
    pub volume_serial_number: LE<u32>,
    pub filesystem_revision: LE<u16>,
    pub volume_flags: LE<u16>,
    pub bytes_per_sector_shift: u8, // [9..=12]
    pub sectors_per_cluster_shift: u8,
    pub number_of_fats: u8,
    pub drive_select: u8,
    pub percent_inuse: u8,
    _reserved: [u8; 7],
    pub bootcode: [u8; 390],
    pub boot_signature: [u8; 2],
}

impl BootSector {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BootError> {
        let bytes: [u8; BOOT_SECTOR_SIZE] = match bytes.get(..BOOT_SECTOR_SIZE) {
            Some(slice) => slice.try_into().map_err(|_| BootError::Truncated(bytes.len()))?,
            None => return Err(BootError::Truncated(bytes.len())),
        };
        // Every field is a plain integer or byte array, any bit pattern is valid
        let boot_sector: Self = unsafe { mem::transmute(bytes) };
        if !boot_sector.is_exfat() {
            return Err(BootError::NotExFAT);
        }
        if boot_sector.boot_signature != hex!("55 AA") {
            return Err(BootError::Signature(boot_sector.boot_signature));
        }
        Ok(boot_sector)
    }

    pub fn is_exfat(&self) -> bool {
        self.jump_boot == hex!("EB 76 90") && &self.filesystem_name == b"EXFAT   "
    }

    pub fn volume_flags(&self) -> VolumeFlags {
        VolumeFlags(self.volume_flags.to_ne())
    }
}

/// Rotating checksum over the first 11 sectors of a boot region
#[derive(Default, Debug)]
pub(crate) struct BootChecksum(u32);

impl BootChecksum {
    fn skipped(index: usize, offset: usize) -> bool {
        // Volume flags and percent in use may change without invalidating the checksum
        let flags = offset_of!(BootSector, volume_flags);
        let percent_inuse = offset_of!(BootSector, percent_inuse);
        index == 0 && (offset == flags || offset == flags + 1 || offset == percent_inuse)
    }

    pub fn write(&mut self, index: usize, sector: &[u8]) {
        let mut sum = self.0;
        for (offset, &byte) in sector.iter().enumerate() {
            if !Self::skipped(index, offset) {
                sum = sum.rotate_right(1).wrapping_add(byte as u32);
            }
        }
        self.0 = sum;
    }

    pub fn sum(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
pub(crate) mod test {
    use memoffset::offset_of;

    use super::{BootChecksum, BootSector, CHECKSUM_SECTOR};
    use crate::error::BootError;

    /// Parameters of a synthesized volume, defaults to 512B sectors and 4KiB clusters
    #[derive(Copy, Clone, Debug)]
    pub(crate) struct Format {
        pub sector_size_shift: u8,
        pub sectors_per_cluster_shift: u8,
        pub fat_offset: u32,
        pub fat_length: u32,
        pub cluster_heap_offset: u32,
        pub cluster_count: u32,
    }

    impl Default for Format {
        fn default() -> Self {
            Self {
                sector_size_shift: 9,
                sectors_per_cluster_shift: 3,
                fat_offset: 32,
                fat_length: 8,
                cluster_heap_offset: 800,
                cluster_count: 1000,
            }
        }
    }

    impl Format {
        pub fn volume_length(&self) -> u64 {
            self.cluster_heap_offset as u64
                + ((self.cluster_count as u64) << self.sectors_per_cluster_shift)
        }

        pub fn boot_sector(&self) -> [u8; 512] {
            let mut bytes = [0u8; 512];
            bytes[..3].copy_from_slice(&hex!("EB 76 90"));
            bytes[3..11].copy_from_slice(b"EXFAT   ");
            bytes[72..80].copy_from_slice(&self.volume_length().to_le_bytes());
            bytes[80..84].copy_from_slice(&self.fat_offset.to_le_bytes());
            bytes[84..88].copy_from_slice(&self.fat_length.to_le_bytes());
            bytes[88..92].copy_from_slice(&self.cluster_heap_offset.to_le_bytes());
            bytes[92..96].copy_from_slice(&self.cluster_count.to_le_bytes());
            bytes[96..100].copy_from_slice(&4u32.to_le_bytes());
            bytes[100..104].copy_from_slice(&0x1234ABCDu32.to_le_bytes());
            bytes[104..106].copy_from_slice(&hex!("00 01"));
            bytes[108] = self.sector_size_shift;
            bytes[109] = self.sectors_per_cluster_shift;
            bytes[110] = 1;
            bytes[111] = 0x80;
            bytes[112] = 0xFF;
            bytes[120..510].fill(0xF4);
            bytes[510..].copy_from_slice(&hex!("55 AA"));
            bytes
        }

        /// Whole zero-filled volume with main and backup boot region
        pub fn image(&self) -> Vec<u8> {
            let sector_size = 1usize << self.sector_size_shift;
            let mut image = vec![0u8; self.volume_length() as usize * sector_size];
            image[..512].copy_from_slice(&self.boot_sector());
            let mut checksum = BootChecksum::default();
            for (index, sector) in image.chunks(sector_size).take(CHECKSUM_SECTOR as usize).enumerate() {
                checksum.write(index, sector);
            }
            let start = CHECKSUM_SECTOR as usize * sector_size;
            for word in image[start..start + sector_size].chunks_mut(4) {
                word.copy_from_slice(&checksum.sum().to_le_bytes());
            }
            image.copy_within(..12 * sector_size, 12 * sector_size);
            image
        }
    }

    #[test]
    fn test_field_offsets() {
        assert_eq!(core::mem::size_of::<BootSector>(), 512);
        assert_eq!(offset_of!(BootSector, partition_offset), 64);
        assert_eq!(offset_of!(BootSector, volume_length), 72);
        assert_eq!(offset_of!(BootSector, fat_offset), 80);
        assert_eq!(offset_of!(BootSector, fat_length), 84);
        assert_eq!(offset_of!(BootSector, cluster_heap_offset), 88);
        assert_eq!(offset_of!(BootSector, cluster_count), 92);
        assert_eq!(offset_of!(BootSector, volume_flags), 106);
        assert_eq!(offset_of!(BootSector, bytes_per_sector_shift), 108);
        assert_eq!(offset_of!(BootSector, sectors_per_cluster_shift), 109);
        assert_eq!(offset_of!(BootSector, percent_inuse), 112);
        assert_eq!(offset_of!(BootSector, boot_signature), 510);
    }

    #[test]
    fn test_exfat() {
        let boot_sector = BootSector::from_bytes(&Format::default().boot_sector()).unwrap();
        assert!(boot_sector.is_exfat());
        assert_eq!(boot_sector.fat_offset.to_ne(), 32);
        assert_eq!(boot_sector.cluster_heap_offset.to_ne(), 800);
        assert_eq!(boot_sector.cluster_count.to_ne(), 1000);
        assert_eq!(boot_sector.volume_length.to_ne(), 8800);
        assert_eq!(boot_sector.volume_flags().volume_dirty(), 0);
    }

    #[test]
    fn test_rejected() {
        let bytes = Format::default().boot_sector();
        assert_eq!(BootSector::from_bytes(&bytes[..100]).unwrap_err(), BootError::Truncated(100));

        let mut fat32 = bytes;
        fat32[3..11].copy_from_slice(b"MSDOS5.0");
        assert_eq!(BootSector::from_bytes(&fat32).unwrap_err(), BootError::NotExFAT);

        let mut unsigned = bytes;
        unsigned[510] = 0;
        assert_eq!(BootSector::from_bytes(&unsigned).unwrap_err(), BootError::Signature([0, 0xAA]));
    }

    #[test]
    fn test_volume_flags() {
        let mut bytes = Format::default().boot_sector();
        bytes[106] = 0b0110;
        let flags = BootSector::from_bytes(&bytes).unwrap().volume_flags();
        assert_eq!(flags.volume_dirty(), 1);
        assert_eq!(flags.media_failure(), 1);
        assert_eq!(flags.active_fat(), 0);
    }

    #[test]
    fn test_checksum_ignores_volume_flags() {
        let bytes = Format::default().boot_sector();
        let mut clean = BootChecksum::default();
        clean.write(0, &bytes);

        let mut dirty = bytes;
        dirty[106] = 0x02;
        dirty[112] = 50;
        let mut checksum = BootChecksum::default();
        checksum.write(0, &dirty);
        assert_eq!(checksum.sum(), clean.sum());

        dirty[100] ^= 0xFF;
        let mut checksum = BootChecksum::default();
        checksum.write(0, &dirty);
        assert_ne!(checksum.sum(), clean.sum());

        // Only the first sector has excluded bytes
        let (mut first, mut second) = (BootChecksum::default(), BootChecksum::default());
        first.write(1, &bytes);
        second.write(1, &dirty);
        assert_ne!(first.sum(), second.sum());
    }
}
