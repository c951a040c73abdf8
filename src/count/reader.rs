use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use super::error::FileReadError;
use super::table::CharTally;

/// Default read buffer size
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Stream `reader` to its end and tally every non-excluded byte
pub fn tally_stream<R: Read>(mut reader: R, buffer: &mut [u8]) -> std::io::Result<CharTally> {
    let mut tally = CharTally::new();
    loop {
        match reader.read(buffer) {
            Ok(0) => return Ok(tally),
            Ok(read) => tally.record(&buffer[..read]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Open `path` and tally its contents
///
/// A file that fails partway through yields an error and no partial tally.
pub fn tally_file(path: &Path, buffer: &mut [u8]) -> Result<CharTally, FileReadError> {
    let file = File::open(path).map_err(|e| FileReadError::new(path, e))?;
    tally_stream(file, buffer).map_err(|e| FileReadError::new(path, e))
}
