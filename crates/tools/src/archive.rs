use std::{
    io::{Cursor, Write},
    path::PathBuf,
};

use thiserror::Error;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Zip packaging errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// A path-backed entry points at a file that does not exist
    #[error("archive source not found: {0}")]
    MissingSource(String),

    #[error("failed to read archive source {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Content of one archive entry
#[derive(Debug, Clone)]
pub enum ArchiveSource {
    /// In-memory buffer
    Bytes(Vec<u8>),
    /// File on local disk, read when the archive is assembled
    Path(PathBuf),
}

/// Named entry placed at the archive root
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub source: ArchiveSource,
}

impl ArchiveEntry {
    pub fn bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            source: ArchiveSource::Bytes(data.into()),
        }
    }

    pub fn path(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: ArchiveSource::Path(path.into()),
        }
    }
}

/// Package entries into a DEFLATE-compressed zip, in order
///
/// Fails on the first path-backed entry whose file is missing; nothing is
/// written anywhere in that case.
pub fn create_zip(entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in entries {
        let data = match entry.source {
            ArchiveSource::Bytes(ref data) => std::borrow::Cow::Borrowed(data.as_slice()),
            ArchiveSource::Path(ref path) => match std::fs::read(path) {
                Ok(data) => std::borrow::Cow::Owned(data),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(ArchiveError::MissingSource(entry.name.clone()));
                }
                Err(source) => {
                    return Err(ArchiveError::Io {
                        name: entry.name.clone(),
                        source,
                    });
                }
            },
        };

        writer.start_file(entry.name.as_str(), options)?;
        writer.write_all(&data).map_err(|source| ArchiveError::Io {
            name: entry.name.clone(),
            source,
        })?;
    }

    Ok(writer.finish()?.into_inner())
}
