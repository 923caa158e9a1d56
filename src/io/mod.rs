pub mod std;

use ::std::io::Result;

/// Positioned access to a raw volume image
///
/// Each transfer is a single attempt and may move fewer bytes than asked,
/// callers decide whether a short transfer is an error
pub trait IO {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize>;
    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<usize>;
    /// Image length in bytes
    fn size(&mut self) -> Result<u64>;
    fn flush(&mut self) -> Result<()>;
}

