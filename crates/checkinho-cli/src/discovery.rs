//! Assigns the PDF files of a folder to document roles by file name.

use std::fs;
use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use tracing::{debug, warn};

use checkinho_core::{DocumentSet, DocumentType, PdfTextProvider};

/// Folder-name fragment marking a campaign folder.
const CAMPAIGN_MARKER: &str = "campanha";

/// Role of a file, from the tokens in its name.
///
/// `SICAF` is tested first since the other tokens are short enough to occur
/// inside longer words.
pub fn document_type_of(file_name: &str) -> Option<DocumentType> {
    let upper = file_name.to_uppercase();
    [
        DocumentType::Sicaf,
        DocumentType::Os,
        DocumentType::Ap,
        DocumentType::At,
    ]
    .into_iter()
    .find(|document_type| upper.contains(document_type.code()))
}

/// PDF files assigned to the documents of one run.
#[derive(Debug, Clone, Default)]
pub struct RunFiles {
    pub name: String,
    pub os: Option<PathBuf>,
    pub ap: Option<PathBuf>,
    pub ats: Vec<PathBuf>,
    pub sicaf: Option<PathBuf>,
}

impl RunFiles {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn assign(&mut self, path: PathBuf) {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return;
        };
        match document_type_of(file_name) {
            Some(DocumentType::Os) => self.os = Some(path),
            Some(DocumentType::Ap) => self.ap = Some(path),
            Some(DocumentType::Sicaf) => self.sicaf = Some(path),
            Some(DocumentType::At) => self.ats.push(path),
            None => debug!("Ignoring {}", path.display()),
        }
    }

    /// Read the text of every assigned file.
    pub fn load(&self, provider: &PdfTextProvider) -> DocumentSet {
        let mut set = DocumentSet::new();
        let singles = [
            (DocumentType::Os, &self.os),
            (DocumentType::Ap, &self.ap),
            (DocumentType::Sicaf, &self.sicaf),
        ];
        for (document_type, path) in singles {
            if let Some(path) = path {
                set.insert(provider.read_document(path, document_type));
            }
        }
        for path in &self.ats {
            set.insert(provider.read_document(path, DocumentType::At));
        }
        set
    }
}

/// PDF files directly inside `dir`, sorted by name.
fn pdf_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.pdf", Pattern::escape(&dir.to_string_lossy()));
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut files: Vec<PathBuf> = glob_with(&pattern, options)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

fn subdirectories(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn folder_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

/// Assign the PDF files directly inside `dir`.
pub fn scan_folder(dir: &Path) -> anyhow::Result<RunFiles> {
    let mut run = RunFiles::named(folder_name(dir));
    for path in pdf_files(dir)? {
        run.assign(path);
    }
    Ok(run)
}

/// Runs found under a batch root.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Runs with an AP, in discovery order.
    pub runs: Vec<RunFiles>,

    /// Folders holding PDFs but no AP.
    pub ignored: Vec<String>,
}

impl Discovery {
    /// Number of run folders found, processed or not.
    pub fn sent(&self) -> usize {
        self.runs.len() + self.ignored.len()
    }

    fn push(&mut self, run: RunFiles) {
        if run.ap.is_some() {
            self.runs.push(run);
        } else {
            warn!("{}: no AP file, folder ignored", run.name);
            self.ignored.push(run.name);
        }
    }
}

/// Walk `root` and collect one run per folder holding PDFs.
///
/// A folder whose name contains `campanha` shares its OS and AT files with
/// each of its subfolders, which hold their own AP and SICAF.
pub fn discover(root: &Path) -> anyhow::Result<Discovery> {
    let mut discovery = Discovery::default();
    walk(root, &mut discovery)?;
    Ok(discovery)
}

fn walk(dir: &Path, discovery: &mut Discovery) -> anyhow::Result<()> {
    if folder_name(dir).to_lowercase().contains(CAMPAIGN_MARKER) {
        return scan_campaign(dir, discovery);
    }

    let run = scan_folder(dir)?;
    if run.os.is_some() || run.ap.is_some() || run.sicaf.is_some() || !run.ats.is_empty() {
        discovery.push(run);
    }

    for subdir in subdirectories(dir)? {
        walk(&subdir, discovery)?;
    }
    Ok(())
}

fn scan_campaign(dir: &Path, discovery: &mut Discovery) -> anyhow::Result<()> {
    let shared = scan_folder(dir)?;
    debug!(
        "Campaign {}: OS {:?}, {} AT files",
        shared.name,
        shared.os,
        shared.ats.len()
    );

    for subdir in subdirectories(dir)? {
        let own = scan_folder(&subdir)?;
        discovery.push(RunFiles {
            name: own.name,
            os: shared.os.clone(),
            ap: own.ap,
            ats: shared.ats.clone(),
            sicaf: own.sicaf,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), b"%PDF-1.4").unwrap();
    }

    #[test]
    fn test_document_type_of() {
        assert_eq!(document_type_of("SICAF - Agencia.pdf"), Some(DocumentType::Sicaf));
        assert_eq!(document_type_of("os_2024.pdf"), Some(DocumentType::Os));
        assert_eq!(document_type_of("AP 123.pdf"), Some(DocumentType::Ap));
        assert_eq!(document_type_of("AT 001.pdf"), Some(DocumentType::At));
        assert_eq!(document_type_of("nota.pdf"), None);
    }

    #[test]
    fn test_scan_folder() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("lote");
        touch(&dir, "OS.pdf");
        touch(&dir, "AP.PDF");
        touch(&dir, "AT 002.pdf");
        touch(&dir, "AT 001.pdf");
        touch(&dir, "SICAF.pdf");
        touch(&dir, "leia-me.txt");

        let run = scan_folder(&dir).unwrap();
        assert_eq!(run.name, "lote");
        assert!(run.os.is_some());
        assert!(run.ap.is_some());
        assert!(run.sicaf.is_some());
        let ats: Vec<_> = run
            .ats
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(ats, vec!["AT 001.pdf", "AT 002.pdf"]);
    }

    #[test]
    fn test_discover_plain_and_ignored_folders() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("lote1"), "OS.pdf");
        touch(&root.join("lote1"), "AP.pdf");
        touch(&root.join("lote2"), "OS.pdf");
        fs::create_dir_all(root.join("vazio")).unwrap();

        let discovery = discover(root).unwrap();
        let names: Vec<&str> = discovery.runs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["lote1"]);
        assert_eq!(discovery.ignored, vec!["lote2"]);
        assert_eq!(discovery.sent(), 2);
    }

    #[test]
    fn test_discover_campaign_shares_os_and_ats() {
        let tmp = TempDir::new().unwrap();
        let campaign = tmp.path().join("Campanha Inverno");
        touch(&campaign, "OS.pdf");
        touch(&campaign, "AT 001.pdf");
        touch(&campaign.join("fornecedor1"), "AP.pdf");
        touch(&campaign.join("fornecedor1"), "SICAF.pdf");
        touch(&campaign.join("fornecedor2"), "SICAF.pdf");

        let discovery = discover(tmp.path()).unwrap();
        assert_eq!(discovery.runs.len(), 1);
        let run = &discovery.runs[0];
        assert_eq!(run.name, "fornecedor1");
        assert_eq!(run.os, Some(campaign.join("OS.pdf")));
        assert_eq!(run.ats, vec![campaign.join("AT 001.pdf")]);
        assert_eq!(discovery.ignored, vec!["fornecedor2"]);
    }
}
