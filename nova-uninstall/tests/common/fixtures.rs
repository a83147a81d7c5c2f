use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A throwaway home directory with a Claude settings file and a projects tree.
pub struct TestHome {
    pub dir: TempDir,
    pub settings: PathBuf,
    pub projects: PathBuf,
}

impl TestHome {
    pub fn new() -> Self {
        crate::test_log!("FIXTURE: Creating test home");

        let dir = TempDir::new().expect("Failed to create temp dir");
        let claude = dir.path().join(".claude");
        let projects = dir.path().join("projects");
        fs::create_dir_all(&claude).expect("Failed to create .claude dir");
        fs::create_dir_all(&projects).expect("Failed to create projects dir");

        Self {
            settings: claude.join("settings.json"),
            projects,
            dir,
        }
    }

    pub fn write_settings(&self, contents: &str) {
        fs::write(&self.settings, contents).expect("Failed to write settings.json");
    }

    pub fn read_settings(&self) -> String {
        fs::read_to_string(&self.settings).expect("Failed to read settings.json")
    }

    pub fn settings_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_settings()).expect("settings.json is not valid JSON")
    }

    pub fn add_session_dir(&self, project: &str) -> PathBuf {
        let path = self.projects.join(project).join(".nova-tracer");
        fs::create_dir_all(path.join("reports")).expect("Failed to create session dir");
        fs::write(path.join("reports/session.json"), "{}\n").expect("Failed to write report");
        path
    }

    pub fn backups(&self) -> Vec<PathBuf> {
        let parent = self.settings.parent().unwrap_or(Path::new("."));
        let mut found: Vec<PathBuf> = fs::read_dir(parent)
            .expect("Failed to list .claude dir")
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("settings.json.backup."))
            })
            .collect();
        found.sort();
        found
    }

    /// Run the binary against this home with stdin piped (non-interactive).
    pub fn run(&self, args: &[&str]) -> Output {
        let output = Command::new(env!("CARGO_BIN_EXE_nova-uninstall"))
            .args(args)
            .env("HOME", self.dir.path())
            .env("NOVA_SETTINGS_PATH", &self.settings)
            .env("NOVA_SWEEP_ROOT", &self.projects)
            .env_remove("NOVA_SWEEP_MAX_DEPTH")
            .env_remove("NOVA_BACKUP_SUFFIX")
            .env_remove("NOVA_BACKUP_TIMESTAMP")
            .env_remove("NOVA_LOG_LEVEL")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .expect("Failed to run nova-uninstall");
        crate::test_log!(
            "nova-uninstall {:?} -> {:?}\nstdout:\n{}\nstderr:\n{}",
            args,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }
}
