use directories::ProjectDirs;
use std::path::PathBuf;

pub fn data_root() -> PathBuf {
    if let Some(pd) = ProjectDirs::from("com", "noteminder", "Noteminder") {
        pd.data_dir().to_path_buf()
    } else {
        // Fallback: current dir
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

pub fn default_store_file() -> (PathBuf, PathBuf) {
    let root = data_root();
    let file = root.join("noteminder.json");
    let backups = root.join("backups");
    (file, backups)
}

pub fn backups_dir_for(file: &std::path::Path) -> PathBuf {
    file.parent()
        .map(|p| p.join("backups"))
        .unwrap_or_else(|| PathBuf::from("backups"))
}

pub fn log_file() -> PathBuf {
    data_root().join("noteminder.log")
}
