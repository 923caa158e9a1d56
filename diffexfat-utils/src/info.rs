use diffexfat::error::Error as DiffError;
use diffexfat::Region;

use super::image;
use crate::error::Error;

fn yes(flag: u16) -> &'static str {
    if flag > 0 { "yes" } else { "no" }
}

pub fn info(device: &str) -> Result<(), Error> {
    let mut image = image::open(device)?;
    let geometry = *image.geometry();
    println!("Sector size:         {}", geometry.sector_size());
    println!("Cluster size:        {}", geometry.cluster_size());
    println!("FAT offset:          {} sectors", geometry.fat_offset_sectors());
    println!("FAT length:          {} sectors x {}", geometry.fat_length_sectors(), geometry.number_of_fats());
    println!("Cluster heap offset: {} sectors", geometry.cluster_heap_offset_sectors());
    println!("Cluster count:       {}", geometry.cluster_count());
    println!("Volume length:       {} sectors", geometry.volume_length_sectors());
    let boundary = geometry.boundary();
    for region in Region::ALL {
        let range = boundary.range(region);
        match region {
            Region::Data => println!("{:<21}{:#x}-", format!("{} region:", region), range.start),
            _ => println!("{:<21}{:#x}-{:#x}", format!("{} region:", region), range.start, range.end()),
        }
    }
    let flags = image.volume_flags();
    println!("Volume dirty:        {}", yes(flags.volume_dirty()));
    println!("Media failure:       {}", yes(flags.media_failure()));
    match image.validate_checksum() {
        Ok(()) => println!("Boot checksum:       ok"),
        Err(DiffError::Checksum { expected, actual }) => {
            warn!("Boot checksum mismatch");
            println!("Boot checksum:       {:08X} (expect {:08X})", actual, expected)
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
