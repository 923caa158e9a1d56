use diffexfat::types::{ClusterID, SectorID};
use diffexfat::{cluster_to_byte_range, sector_to_byte_range};
use pretty_hex::{config_hex, HexConfig};

use super::image;
use crate::error::Error;

const WIDTH: usize = 16;

/// Runs of all-zero lines are squeezed into a single `*` after the first one,
/// the last line is always kept
fn hexdump(data: &[u8]) -> String {
    let config = HexConfig { title: false, width: WIDTH, group: 0, ..HexConfig::default() };
    let dump = config_hex(&data, config);
    let num_rows = data.chunks(WIDTH).count();
    let mut lines = Vec::with_capacity(num_rows);
    let mut zeros = 0;
    for (index, (line, row)) in dump.lines().zip(data.chunks(WIDTH)).enumerate() {
        if index + 1 == num_rows || row.iter().any(|&byte| byte != 0) {
            zeros = 0;
            lines.push(line);
            continue;
        }
        zeros += 1;
        match zeros {
            1 => lines.push(line),
            2 => lines.push("*"),
            _ => continue,
        }
    }
    lines.join("\n")
}

pub fn sector(device: &str, index: u64, count: u64) -> Result<(), Error> {
    let mut image = image::open(device)?;
    let sector = SectorID::from(index);
    let range = sector_to_byte_range(image.geometry(), sector, count)?;
    let mut buf = vec![0u8; range.length as usize];
    image.get_sectors(sector, count, &mut buf)?;
    println!("Sector #{}:", index);
    println!("{}", hexdump(&buf));
    Ok(())
}

pub fn cluster(device: &str, index: u32, count: u64) -> Result<(), Error> {
    let mut image = image::open(device)?;
    let cluster = ClusterID::from(index);
    let range = cluster_to_byte_range(image.geometry(), cluster, count)?;
    let mut buf = vec![0u8; range.length as usize];
    image.get_clusters(cluster, count, &mut buf)?;
    println!("Cluster #{}:", index);
    println!("{}", hexdump(&buf));
    Ok(())
}
