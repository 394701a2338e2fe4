#![allow(dead_code)]

use async_trait::async_trait;
use counterparty_setup::config::{AppNaming, BootstrapConfig, LegacyNaming};
use counterparty_setup::{
    ArchiveFetcher, HostDirs, Network, Platform, Prompt, SetupError, SetupPaths, SetupResult,
};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::sync::Notify;

/// Isolated home, work and data directories for one test
pub struct TestEnv {
    pub temp: TempDir,
    pub host: HostDirs,
    pub paths: SetupPaths,
    pub work_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let work_dir = temp.path().join("work");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(&work_dir).unwrap();

        let host = HostDirs::with_home(&home);
        let paths = SetupPaths::resolve(
            Platform::Unix,
            &host,
            &AppNaming::default(),
            &LegacyNaming::default(),
        );
        TestEnv {
            temp,
            host,
            paths,
            work_dir,
        }
    }

    pub fn write(&self, path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    /// Names of entries in the data directory (empty if it does not exist)
    pub fn data_dir_entries(&self) -> Vec<String> {
        match std::fs::read_dir(&self.paths.data_dir) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Value assigned to `key` in a generated config, `None` if commented out or missing
pub fn assigned_value(content: &str, key: &str) -> Option<String> {
    let prefix = format!("{} = ", key);
    content
        .lines()
        .find_map(|line| line.strip_prefix(&prefix))
        .map(str::to_string)
}

pub fn gzip_tar(member: &str, content: &[u8]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    let mut header = tar::Header::new_gnu();
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder.append_data(&mut header, member, content).unwrap();
    builder.into_inner().unwrap().finish().unwrap()
}

/// Serves in-memory gzip tar archives instead of downloading
pub struct FakeFetcher {
    archives: HashMap<String, Vec<u8>>,
    calls: Arc<AtomicUsize>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeFetcher {
    /// Archives for both networks, database content `"<label>-<network>"`
    pub fn for_config(config: &BootstrapConfig, label: &str) -> Self {
        let mut archives = HashMap::new();
        for network in [Network::Mainnet, Network::Testnet] {
            let source = config.source(network);
            let content = format!("{}-{}", label, network);
            archives.insert(
                source.url.clone(),
                gzip_tar(&source.member_name, content.as_bytes()),
            );
        }
        FakeFetcher {
            archives,
            calls: Arc::new(AtomicUsize::new(0)),
            gate: Mutex::new(None),
        }
    }

    pub fn with_archive(mut self, url: &str, archive: Vec<u8>) -> Self {
        self.archives.insert(url.to_string(), archive);
        self
    }

    pub fn without(mut self, url: &str) -> Self {
        self.archives.remove(url);
        self
    }

    /// First fetch waits until `gate` is notified
    pub fn gated(self, gate: Arc<Notify>) -> Self {
        *self.gate.lock().unwrap() = Some(gate);
        self
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl ArchiveFetcher for FakeFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> SetupResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let archive = self.archives.get(url).ok_or_else(|| SetupError::Io {
            path: dest.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, format!("404 {}", url)),
        })?;
        std::fs::write(dest, archive).map_err(|source| SetupError::Io {
            path: dest.to_path_buf(),
            source,
        })
    }
}

/// Answers every question with a fixed line
pub struct ScriptedPrompt {
    answer: String,
    asked: Arc<AtomicUsize>,
}

impl ScriptedPrompt {
    pub fn answering(answer: &str) -> Self {
        ScriptedPrompt {
            answer: answer.to_string(),
            asked: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn ask_counter(&self) -> Arc<AtomicUsize> {
        self.asked.clone()
    }
}

#[async_trait]
impl Prompt for ScriptedPrompt {
    async fn ask(&self, question: &str) -> SetupResult<String> {
        assert!(question.ends_with("(y/N): "));
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}
