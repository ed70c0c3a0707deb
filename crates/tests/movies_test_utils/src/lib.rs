pub mod ftp;

pub use ftp::FakeFtpServer;
