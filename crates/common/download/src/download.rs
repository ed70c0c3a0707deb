use crate::error::DownloadError;
use crate::error::ErrContext;
use crate::protocol::Protocol;
use nix::sys::statvfs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::debug;
use url::Url;

#[derive(Debug)]
pub struct Downloader {
    target_filename: PathBuf,
}

impl Downloader {
    pub fn new(target_filename: impl Into<PathBuf>) -> Self {
        Self {
            target_filename: target_filename.into(),
        }
    }

    /// Fetch `url` with the given protocol and store it at the target filename.
    ///
    /// Any existing file at the target is replaced, but only once the whole
    /// resource has been received.
    pub fn download(&self, url: &Url, protocol: Protocol) -> Result<u64, DownloadError> {
        if !protocol.serves(url.scheme()) {
            return Err(DownloadError::SchemeMismatch {
                url: url.to_string(),
                protocol,
            });
        }

        let mut destination = Destination::new(&self.target_filename)?;
        let bytes = protocol.transfer()?.transfer(url, &mut destination)?;
        destination.persist()?;

        debug!(
            "Downloaded {bytes} bytes from {url} to {}",
            self.target_filename.display()
        );
        Ok(bytes)
    }

    pub fn filename(&self) -> &Path {
        self.target_filename.as_path()
    }
}

/// A temporary file that becomes the target file once the transfer completed.
///
/// The temporary file is created in the same directory as the target, so
/// [`Destination::persist`] is an atomic rename. A destination dropped without
/// being persisted removes its temporary file.
#[derive(Debug)]
pub struct Destination {
    file: NamedTempFile,
    target: PathBuf,
}

impl Destination {
    pub fn new(target: impl AsRef<Path>) -> Result<Self, DownloadError> {
        let target = target.as_ref();
        let dir = parent_dir(target);
        let file = tempfile::Builder::new()
            .prefix(".download-")
            .tempfile_in(dir)
            .context(format!(
                "Failed to create a temporary file in {}",
                dir.display()
            ))?;

        Ok(Destination {
            file,
            target: target.to_path_buf(),
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Check that `len` bytes can be written without using up the file system.
    pub fn reserve(&mut self, len: u64) -> Result<(), DownloadError> {
        if len == 0 {
            return Ok(());
        }
        let dir = parent_dir(&self.target);
        let stats = statvfs::statvfs(dir).context(format!(
            "Failed to read file system statistics of {}",
            dir.display()
        ))?;
        let block_size = stats.fragment_size() as u64;
        check_available_space(
            len,
            stats.blocks() as u64 * block_size,
            stats.blocks_available() as u64 * block_size,
        )
    }

    /// Atomically move the downloaded content to the target path.
    pub fn persist(mut self) -> Result<PathBuf, DownloadError> {
        self.file
            .flush()
            .context(format!("Failed to flush {}", self.target.display()))?;
        let target = self.target;
        self.file
            .persist(&target)
            .context(format!("Failed to move download to {}", target.display()))?;
        Ok(target)
    }
}

impl Write for Destination {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

// Reserve 5% of total disk space
fn check_available_space(len: u64, total: u64, available: u64) -> Result<(), DownloadError> {
    let five_percent_disk_space = total * 5 / 100;
    let usable_disk_space = available.saturating_sub(five_percent_disk_space);
    if len >= usable_disk_space {
        return Err(DownloadError::InsufficientSpace);
    }
    Ok(())
}
