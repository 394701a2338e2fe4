//! Database bootstrap from pre-built snapshots
//!
//! Downloads the mainnet and testnet snapshot archives, extracts them into a
//! work directory and installs the contained database files into the data
//! directory. Steps run strictly in sequence; a failure part-way leaves
//! whatever was already installed in place.

use crate::config::BootstrapConfig;
use crate::error::{IoResultExt, SetupError, SetupResult};
use crate::paths::{Network, SetupPaths};
use crate::utils::fs::{create_app_dir_all, set_owner_group_rw};
use async_trait::async_trait;
use flate2::read::GzDecoder;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Source of snapshot archives
#[async_trait]
pub trait ArchiveFetcher: Send + Sync {
    /// Download `url` into the file at `dest`
    async fn fetch(&self, url: &str, dest: &Path) -> SetupResult<()>;
}

/// Interactive question/answer channel
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Show `question` and return the raw answer line
    async fn ask(&self, question: &str) -> SetupResult<String>;
}

/// HTTP(S) archive download via reqwest
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("counterparty-setup/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArchiveFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> SetupResult<()> {
        let download_error = |source| SetupError::Download {
            url: url.to_string(),
            source,
        };

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(download_error)?;

        let mut file = tokio::fs::File::create(dest).await.at_path(dest)?;
        let streamed = async {
            let mut written: u64 = 0;
            while let Some(chunk) = response.chunk().await.map_err(download_error)? {
                file.write_all(&chunk).await.at_path(dest)?;
                written += chunk.len() as u64;
            }
            file.flush().await.at_path(dest)?;
            Ok::<_, SetupError>(written)
        }
        .await;

        match streamed {
            Ok(written) => {
                debug!("Downloaded {} bytes from {}", written, url);
                Ok(())
            }
            Err(e) => {
                drop(file);
                if let Err(remove) = tokio::fs::remove_file(dest).await {
                    debug!("Could not remove partial download {}: {}", dest.display(), remove);
                }
                Err(e)
            }
        }
    }
}

/// Prompt on stdout, answer from stdin
pub struct StdinPrompt;

#[async_trait]
impl Prompt for StdinPrompt {
    async fn ask(&self, question: &str) -> SetupResult<String> {
        let question = question.to_string();
        tokio::task::spawn_blocking(move || -> SetupResult<String> {
            let mut stdout = std::io::stdout();
            stdout
                .write_all(question.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(SetupError::Prompt)?;

            let mut answer = String::new();
            std::io::stdin()
                .read_line(&mut answer)
                .map_err(SetupError::Prompt)?;
            Ok(answer)
        })
        .await?
    }
}

/// Only a case-insensitive `y` counts as consent
pub fn is_affirmative(answer: &str) -> bool {
    answer
        .trim_end_matches(|c: char| c == '\r' || c == '\n')
        .eq_ignore_ascii_case("y")
}

/// Unpack every entry of the gzip tar `archive` into `dest`
pub fn extract_archive(archive: &Path, dest: &Path) -> SetupResult<()> {
    let file = std::fs::File::open(archive).at_path(archive)?;
    let mut tar = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
    tar.unpack(dest).at_path(archive)
}

/// Bootstrap run options
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    /// Replace an existing mainnet database
    pub overwrite: bool,
    /// Ask before downloading anything
    pub ask_confirmation: bool,
    /// Directory archives are downloaded to and extracted in
    pub work_dir: PathBuf,
}

/// What a bootstrap run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Mainnet database already present and overwrite not requested
    AlreadyPresent,
    /// User declined the confirmation prompt
    Declined,
    /// Databases installed, in network order
    Installed(Vec<PathBuf>),
}

/// Downloads and installs the snapshot databases
pub struct BootstrapInstaller<F, P> {
    config: BootstrapConfig,
    paths: SetupPaths,
    fetcher: F,
    prompt: P,
}

impl<F: ArchiveFetcher, P: Prompt> BootstrapInstaller<F, P> {
    pub fn new(config: BootstrapConfig, paths: SetupPaths, fetcher: F, prompt: P) -> Self {
        Self {
            config,
            paths,
            fetcher,
            prompt,
        }
    }

    fn confirmation_question(&self) -> String {
        format!(
            "Would you like to bootstrap your local Counterparty database from ‘{}’? (y/N): ",
            self.config.bucket_url
        )
    }

    /// Run the bootstrap
    ///
    /// Only the mainnet database is checked for prior existence; an existing
    /// testnet database alone does not prevent a run.
    pub async fn run(&self, options: &BootstrapOptions) -> SetupResult<BootstrapOutcome> {
        create_app_dir_all(&self.paths.data_dir)?;

        let mainnet = self.paths.database(Network::Mainnet);
        if !options.overwrite && mainnet.exists() {
            info!(
                "Database {} already exists, skipping bootstrap",
                mainnet.display()
            );
            return Ok(BootstrapOutcome::AlreadyPresent);
        }

        if options.ask_confirmation {
            let answer = self.prompt.ask(&self.confirmation_question()).await?;
            if !is_affirmative(&answer) {
                info!("Bootstrap declined");
                return Ok(BootstrapOutcome::Declined);
            }
        }

        let mut installed = Vec::new();
        for network in [Network::Mainnet, Network::Testnet] {
            installed.push(self.install(network, &options.work_dir).await?);
        }
        Ok(BootstrapOutcome::Installed(installed))
    }

    async fn install(&self, network: Network, work_dir: &Path) -> SetupResult<PathBuf> {
        let source = self.config.source(network);
        let archive = work_dir.join(&source.archive_name);

        info!("Downloading {} database from {}…", network, source.url);
        self.fetcher.fetch(&source.url, &archive).await?;

        info!("Extracting {}…", archive.display());
        let (archive_path, dest) = (archive.clone(), work_dir.to_path_buf());
        tokio::task::spawn_blocking(move || extract_archive(&archive_path, &dest)).await??;

        let extracted = work_dir.join(&source.member_name);
        if !extracted.is_file() {
            return Err(SetupError::MissingArchiveMember {
                archive: source.archive_name.clone(),
                member: source.member_name.clone(),
            });
        }

        let database = self.paths.database(network).to_path_buf();
        info!("Copying {} to {}…", extracted.display(), database.display());
        tokio::fs::copy(&extracted, &database)
            .await
            .at_path(&database)?;
        set_owner_group_rw(&database)?;

        tokio::fs::remove_file(&archive).await.at_path(&archive)?;
        Ok(database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::TempDir;

    fn write_archive(path: &Path, member: &str, content: &[u8]) {
        let file = std::fs::File::create(path).unwrap();
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, member, content).unwrap();
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y\n"));
        assert!(is_affirmative("y\r\n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(" y"));
    }

    #[test]
    fn test_extract_archive() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("db.tar.gz");
        write_archive(&archive, "counterpartyd.9.db", b"sqlite");

        let out = temp.path().join("out");
        std::fs::create_dir(&out).unwrap();
        extract_archive(&archive, &out).unwrap();
        assert_eq!(std::fs::read(out.join("counterpartyd.9.db")).unwrap(), b"sqlite");
    }

    #[test]
    fn test_extract_corrupt_archive_fails() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("db.tar.gz");
        std::fs::write(&archive, b"definitely not gzip").unwrap();

        let err = extract_archive(&archive, temp.path()).unwrap_err();
        assert!(matches!(err, SetupError::Io { .. }));
    }
}
