use anyhow::{anyhow, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::paths::get_tesseract_dir;

const TESSDATA_REPO: &str = "https://github.com/tesseract-ocr/tessdata/raw/main";

#[cfg(windows)]
const TESSERACT_BINARY: &str = "tesseract.exe";
#[cfg(not(windows))]
const TESSERACT_BINARY: &str = "tesseract";

#[cfg(windows)]
const COMMON_INSTALL_DIRS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR",
    r"C:\Program Files (x86)\Tesseract-OCR",
];
#[cfg(not(windows))]
const COMMON_INSTALL_DIRS: &[&str] = &["/usr/local/bin", "/usr/bin", "/opt/homebrew/bin"];

#[cfg(windows)]
const SYSTEM_TESSDATA_DIRS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tessdata",
    r"C:\Program Files (x86)\Tesseract-OCR\tessdata",
];
#[cfg(not(windows))]
const SYSTEM_TESSDATA_DIRS: &[&str] = &[
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
];

/// Where the engine binary and its language data live.
#[derive(Debug, Clone)]
pub struct TesseractPaths {
    pub executable: PathBuf,
    pub tessdata: PathBuf,
}

fn traineddata_name(language: &str) -> String {
    format!("{}.traineddata", language)
}

/// Ensures Tesseract and the language data are available.
/// Downloads the traineddata file into the local data dir if no copy is found.
pub fn ensure_tesseract(language: &str) -> Result<TesseractPaths> {
    let executable = find_tesseract_executable()?;

    if let Ok(tessdata) = find_tessdata_dir(language) {
        log::info!(
            "Tesseract found: {} (tessdata: {})",
            executable.display(),
            tessdata.display()
        );
        return Ok(TesseractPaths {
            executable,
            tessdata,
        });
    }

    log::info!("{} not found locally, downloading...", traineddata_name(language));

    let tessdata = get_tesseract_dir().join("tessdata");
    fs::create_dir_all(&tessdata)?;
    download_tessdata(&tessdata, language)?;

    log::info!("Tesseract ready, tessdata at: {}", tessdata.display());

    Ok(TesseractPaths {
        executable,
        tessdata,
    })
}

/// Downloads `<language>.traineddata` from the tessdata repository.
fn download_tessdata(tessdata_dir: &Path, language: &str) -> Result<()> {
    let file_name = traineddata_name(language);
    let url = format!("{}/{}", TESSDATA_REPO, file_name);
    let target = tessdata_dir.join(&file_name);

    log::info!("Downloading {}...", url);

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    let response = client
        .get(&url)
        .header("User-Agent", "nutrition-screenshot")
        .send()?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to download {}: HTTP {}",
            file_name,
            response.status()
        ));
    }

    let bytes = response.bytes()?;
    let mut file = fs::File::create(&target)?;
    file.write_all(&bytes)?;

    log::info!("Downloaded {} ({} bytes)", file_name, bytes.len());

    Ok(())
}

/// Finds the Tesseract executable: local dir first, then PATH, then common install dirs.
pub fn find_tesseract_executable() -> Result<PathBuf> {
    let local_exe = get_tesseract_dir().join(TESSERACT_BINARY);
    if local_exe.exists() {
        return Ok(local_exe);
    }

    if let Ok(output) = Command::new(TESSERACT_BINARY).arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from(TESSERACT_BINARY));
        }
    }

    COMMON_INSTALL_DIRS
        .iter()
        .map(|dir| Path::new(dir).join(TESSERACT_BINARY))
        .find(|p| p.exists())
        .ok_or_else(|| anyhow!("Tesseract not found. Please install Tesseract-OCR."))
}

/// Finds a tessdata directory containing `<language>.traineddata`.
pub fn find_tessdata_dir(language: &str) -> Result<PathBuf> {
    let file_name = traineddata_name(language);

    let mut candidates = vec![get_tesseract_dir().join("tessdata")];

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let prefix = PathBuf::from(prefix);
        candidates.push(prefix.join("tessdata"));
        candidates.push(prefix);
    }

    candidates.extend(SYSTEM_TESSDATA_DIRS.iter().map(PathBuf::from));

    first_dir_containing(&candidates, &file_name).ok_or_else(|| {
        anyhow!(
            "tessdata directory not found. Please ensure {} is available.",
            file_name
        )
    })
}

fn first_dir_containing(candidates: &[PathBuf], file_name: &str) -> Option<PathBuf> {
    candidates
        .iter()
        .find(|dir| dir.join(file_name).exists())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traineddata_name() {
        assert_eq!(traineddata_name("eng"), "eng.traineddata");
    }

    #[test]
    fn test_first_dir_containing() {
        let empty = tempfile::tempdir().unwrap();
        let with_data = tempfile::tempdir().unwrap();
        fs::write(with_data.path().join("eng.traineddata"), b"data").unwrap();

        let candidates = vec![
            empty.path().to_path_buf(),
            with_data.path().to_path_buf(),
        ];

        assert_eq!(
            first_dir_containing(&candidates, "eng.traineddata"),
            Some(with_data.path().to_path_buf())
        );
        assert_eq!(first_dir_containing(&candidates, "deu.traineddata"), None);
    }
}
