//! Zip and tar extraction

use crate::error::RetrievalError;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Extract every entry of a zip archive into `dest`.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<(), RetrievalError> {
    let file = File::open(archive).map_err(|e| RetrievalError::io(archive, e))?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| RetrievalError::extraction(archive, e))?;
    tracing::debug!("Extracting {} zip entries from {}", zip.len(), archive.display());
    zip.extract(dest)
        .map_err(|e| RetrievalError::extraction(archive, e))
}

/// Extract a tar archive into `dest`. Gzip-compressed tarballs are accepted.
pub fn extract_tar(archive: &Path, dest: &Path) -> Result<(), RetrievalError> {
    let reader: Box<dyn Read> = if is_gzip(archive)? {
        let file = File::open(archive).map_err(|e| RetrievalError::io(archive, e))?;
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        let file = File::open(archive).map_err(|e| RetrievalError::io(archive, e))?;
        Box::new(BufReader::new(file))
    };

    tracing::debug!("Extracting tar archive {}", archive.display());
    tar::Archive::new(reader)
        .unpack(dest)
        .map_err(|e| RetrievalError::extraction(archive, e))
}

fn is_gzip(path: &Path) -> Result<bool, RetrievalError> {
    let mut file = File::open(path).map_err(|e| RetrievalError::io(path, e))?;
    let mut magic = [0u8; 2];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == GZIP_MAGIC),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(RetrievalError::io(path, e)),
    }
}
