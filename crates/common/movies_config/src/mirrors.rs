use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

const DE_MIRROR: &str = "ftp://ftp.fu-berlin.de/pub/misc/movies/database";
const FI_MIRROR: &str = "ftp://ftp.funet.fi/pub/mirrors/ftp.imdb.com/pub";
const SE_MIRROR: &str = "ftp://ftp.sunet.se/pub/tv+movies/imdb";

/// Mirror base addresses, indexed by protocol then by region.
///
/// In `movies.toml`:
///
/// ```toml
/// [mirrors.ftp]
/// de = "ftp://ftp.fu-berlin.de/pub/misc/movies/database"
///
/// [mirrors.http]
/// local = "http://localhost:8080/imdb"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MirrorTable(BTreeMap<String, BTreeMap<String, String>>);

impl Default for MirrorTable {
    fn default() -> Self {
        let mut table = MirrorTable(BTreeMap::new());
        table.insert("ftp", "de", DE_MIRROR);
        table.insert("ftp", "fi", FI_MIRROR);
        table.insert("ftp", "se", SE_MIRROR);
        table
    }
}

impl MirrorTable {
    pub fn insert(&mut self, protocol: &str, region: &str, base: impl Into<String>) {
        self.0
            .entry(protocol.to_ascii_lowercase())
            .or_default()
            .insert(region.to_ascii_lowercase(), base.into());
    }

    /// The mirror base address for a protocol in a region, if one is declared.
    pub fn lookup(&self, protocol: &str, region: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(protocol))
            .and_then(|(_, regions)| {
                regions
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(region))
            })
            .map(|(_, base)| base.as_str())
    }

    /// The mirror to download from: `mirror` when given, otherwise the one
    /// declared for the protocol in the region.
    pub fn mirror_for(&self, mirror: Option<&str>, protocol: &str, region: &str) -> Option<String> {
        mirror
            .or_else(|| self.lookup(protocol, region))
            .map(str::to_string)
    }

    /// The regions with a mirror for the given protocol.
    pub fn regions(&self, protocol: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(protocol))
            .flat_map(|(_, regions)| regions.keys().map(String::as_str))
            .collect()
    }
}
