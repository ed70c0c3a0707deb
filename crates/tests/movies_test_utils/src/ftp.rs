use std::collections::HashMap;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::net::SocketAddr;
use std::net::TcpListener;
use std::net::TcpStream;
use std::sync::Arc;
use std::sync::Mutex;

/// A minimal FTP server serving in-memory files over passive-mode `RETR`.
///
/// It accepts any login and only implements the commands a download needs:
/// `USER`, `PASS`, `TYPE`, `SIZE`, `PASV`, `RETR` and `QUIT`.
/// The server thread runs until the test process exits.
pub struct FakeFtpServer {
    addr: SocketAddr,
    retrieved: Arc<Mutex<Vec<String>>>,
}

impl FakeFtpServer {
    pub fn start<I, P, C>(files: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<Vec<u8>>,
    {
        let files: HashMap<String, Vec<u8>> = files
            .into_iter()
            .map(|(path, content)| (path.into(), content.into()))
            .collect();
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let retrieved = Arc::new(Mutex::new(Vec::new()));

        let session_log = retrieved.clone();
        std::thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let _ = serve_session(stream, &files, &session_log);
            }
        });

        Ok(FakeFtpServer { addr, retrieved })
    }

    /// The `ftp://host:port` base address of the server
    pub fn url(&self) -> String {
        format!("ftp://{}", self.addr)
    }

    /// Paths of the files sent so far, in order
    pub fn retrieved(&self) -> Vec<String> {
        self.retrieved
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }
}

fn serve_session(
    stream: TcpStream,
    files: &HashMap<String, Vec<u8>>,
    retrieved: &Mutex<Vec<String>>,
) -> io::Result<()> {
    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);
    let mut data_listener: Option<TcpListener> = None;

    reply(&mut writer, "220 movies test server ready")?;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim_end();
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));

        match command.to_ascii_uppercase().as_str() {
            "USER" => reply(&mut writer, "331 Password required")?,
            "PASS" => reply(&mut writer, "230 Logged in")?,
            "TYPE" => reply(&mut writer, "200 Type set")?,
            "SIZE" => match files.get(argument) {
                Some(content) => reply(&mut writer, &format!("213 {}", content.len()))?,
                None => reply(&mut writer, "550 No such file")?,
            },
            "PASV" => {
                let listener = TcpListener::bind("127.0.0.1:0")?;
                let port = listener.local_addr()?.port();
                data_listener = Some(listener);
                reply(
                    &mut writer,
                    &format!(
                        "227 Entering Passive Mode (127,0,0,1,{},{})",
                        port >> 8,
                        port & 0xff
                    ),
                )?;
            }
            "RETR" => match (files.get(argument), data_listener.take()) {
                (Some(content), Some(listener)) => {
                    reply(&mut writer, "150 Opening data connection")?;
                    let (mut data, _) = listener.accept()?;
                    data.write_all(content)?;
                    drop(data);
                    if let Ok(mut paths) = retrieved.lock() {
                        paths.push(argument.to_string());
                    }
                    reply(&mut writer, "226 Transfer complete")?;
                }
                (None, _) => reply(&mut writer, "550 No such file")?,
                (_, None) => reply(&mut writer, "425 Use PASV first")?,
            },
            "QUIT" => {
                reply(&mut writer, "221 Bye")?;
                return Ok(());
            }
            _ => reply(&mut writer, "502 Command not implemented")?,
        }
    }
}

fn reply(writer: &mut TcpStream, message: &str) -> io::Result<()> {
    writer.write_all(message.as_bytes())?;
    writer.write_all(b"\r\n")?;
    writer.flush()
}
