use crate::download::Destination;
use crate::error::DownloadError;
use crate::error::ErrContext;
use crate::protocol::Transfer;
use percent_encoding::percent_decode_str;
use std::io;
use suppaftp::types::FileType;
use suppaftp::FtpStream;
use tracing::debug;
use tracing::warn;
use url::Url;

const DEFAULT_FTP_PORT: u16 = 21;
const ANONYMOUS: &str = "anonymous";

/// Fetch resources with a passive-mode FTP `RETR`.
///
/// Public mirrors accept anonymous sessions, which is what is used unless the
/// URL carries credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct FtpTransfer;

impl Transfer for FtpTransfer {
    fn transfer(&self, url: &Url, destination: &mut Destination) -> Result<u64, DownloadError> {
        let host = url.host_str().ok_or_else(|| DownloadError::MissingHost {
            url: url.to_string(),
        })?;
        let port = url.port().unwrap_or(DEFAULT_FTP_PORT);
        let (user, password) = credentials(url);
        let path = remote_path(url);

        let mut ftp = FtpStream::connect((host, port))?;
        ftp.login(user.as_str(), password.as_str())?;
        ftp.transfer_type(FileType::Binary)?;

        match ftp.size(path.as_str()) {
            Ok(len) => destination.reserve(len as u64)?,
            Err(err) => debug!("Size of {url} is unknown: {err}"),
        }

        let mut stream = ftp.retr_as_stream(path.as_str())?;
        let bytes = io::copy(&mut stream, destination).context(format!(
            "Failed to transfer {url} to {}",
            destination.target().display()
        ))?;
        ftp.finalize_retr_stream(stream)?;

        if let Err(err) = ftp.quit() {
            warn!("Failed to close FTP session with {host}: {err}");
        }
        Ok(bytes)
    }
}

fn credentials(url: &Url) -> (String, String) {
    let user = match url.username() {
        "" => ANONYMOUS.to_string(),
        user => percent_decode_str(user).decode_utf8_lossy().into_owned(),
    };
    let password = url
        .password()
        .map(|password| percent_decode_str(password).decode_utf8_lossy().into_owned())
        .unwrap_or_else(|| ANONYMOUS.to_string());
    (user, password)
}

fn remote_path(url: &Url) -> String {
    percent_decode_str(url.path())
        .decode_utf8_lossy()
        .into_owned()
}
