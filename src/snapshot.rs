use crate::record::Snapshot;
use anyhow::Result;
use std::{fs, fs::File, path::PathBuf};
use tracing::warn;

/// 判断仓库是否已经采集过，键存在即跳过，不关心记录新旧
pub fn is_processed(snapshot: &Snapshot, repo: &str) -> bool {
    snapshot.contains_key(repo)
}

/// 快照的磁盘读写
///
/// 快照是以规范仓库名为键的 JSON 文档，每成功采集一个仓库就整体重写一次
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// 加载已有快照，文件不存在或内容不可读时返回空映射
    pub fn load(&self) -> Snapshot {
        let f = match File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return Snapshot::new(),
        };

        match serde_json::from_reader(f) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    "failed to read snapshot '{}', start from empty, error: {}",
                    self.path.display(),
                    e
                );
                Snapshot::new()
            }
        }
    }

    /// 整体写出快照，先写临时文件再改名，中断时保留旧内容
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        let f = File::create(&tmp)?;
        serde_json::to_writer_pretty(f, snapshot)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RepoRecord;
    use std::io::Write;

    fn record(stars: u64) -> RepoRecord {
        RepoRecord {
            branches: vec!["main".to_string()],
            first_commit: "2021-01-01T00:00:00Z".to_string(),
            last_commit: "2021-06-01T00:00:00Z".to_string(),
            total_commits: 10,
            pull_requests: 2,
            stars,
            forks: 0,
            open_issues: 1,
            top_contributors: vec![],
        }
    }

    #[test]
    fn test_load_absent_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("missing.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"{ not json").unwrap();

        let store = SnapshotStore::new(path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("repos.json"));

        let mut snapshot = Snapshot::new();
        snapshot.insert("owner/repo".to_string(), record(7));
        store.save(&snapshot).unwrap();

        let loaded = store.load();
        assert_eq!(snapshot, loaded);
        assert!(is_processed(&loaded, "owner/repo"));
        assert!(!is_processed(&loaded, "owner/other"));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("repos.json"));

        let mut snapshot = Snapshot::new();
        snapshot.insert("owner/repo".to_string(), record(1));
        store.save(&snapshot).unwrap();

        snapshot.insert("owner/other".to_string(), record(2));
        store.save(&snapshot).unwrap();

        let loaded = store.load();
        assert_eq!(2, loaded.len());
        assert_eq!(1, loaded["owner/repo"].stars);
    }
}
