//! ZIP archive extraction and output packaging.

use std::fs::File;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::{Error, Result};

/// Extract a `.zip` archive into `scratch_dir/<stem>` and return the
/// extraction root.
///
/// Entries whose name would escape the extraction root are skipped
/// (`enclosed_name` guards against zip-slip).
pub fn extract_zip_pack(zip_path: &Utf8Path, scratch_dir: &Utf8Path) -> Result<Utf8PathBuf> {
    let stem = zip_path.file_stem().unwrap_or("pack");
    let extract_root = scratch_dir.join(stem);

    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(enclosed) = entry.enclosed_name() else {
            continue;
        };
        let out_path = extract_root.as_std_path().join(enclosed);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut out_file = File::create(&out_path)?;
            io::copy(&mut entry, &mut out_file)?;
        }
    }

    Ok(extract_root)
}

/// Archive a finished output tree into a single deflated `.zip` file.
///
/// Paths inside the archive are relative to `out_dir` with forward slashes.
pub fn zip_output_tree(out_dir: &Utf8Path, zip_path: &Utf8Path) -> Result<()> {
    let file = File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for entry in WalkDir::new(out_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Other(format!("failed to walk {out_dir}: {e}")))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(out_dir)
            .map_err(|e| Error::Other(format!("path outside output tree: {e}")))?;
        let zip_name = rel.to_string_lossy().replace('\\', "/");

        zip.start_file(zip_name, options)?;
        let mut src = File::open(entry.path())?;
        io::copy(&mut src, &mut zip)?;
    }

    zip.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read, Write};
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_test_zip(path: &Utf8Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, bytes) in entries {
            zip.start_file(name.to_string(), options).unwrap();
            zip.write_all(bytes).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn extract_zip_pack_recreates_tree() {
        let temp = tempdir().unwrap();
        let root = Utf8Path::from_path(temp.path()).unwrap();
        let zip_path = root.join("mypack.zip");
        write_test_zip(
            &zip_path,
            &[
                ("pack.mcmeta", br#"{"pack": {"pack_format": 15}}"#),
                ("assets/minecraft/lang/en_us.json", b"{}"),
            ],
        );

        let scratch = root.join("scratch");
        std::fs::create_dir_all(&scratch).unwrap();
        let extracted = extract_zip_pack(&zip_path, &scratch).unwrap();

        assert_eq!(extracted, scratch.join("mypack"));
        assert!(extracted.join("pack.mcmeta").is_file());
        assert!(extracted.join("assets/minecraft/lang/en_us.json").is_file());
    }

    #[test]
    fn zip_output_tree_round_trips() {
        let temp = tempdir().unwrap();
        let root = Utf8Path::from_path(temp.path()).unwrap();
        let out_dir = root.join("merged_pack");
        std::fs::create_dir_all(out_dir.join("assets/minecraft")).unwrap();
        std::fs::write(out_dir.join("pack.mcmeta"), b"{}").unwrap();
        std::fs::write(out_dir.join("assets/minecraft/a.png"), b"bytes").unwrap();

        let zip_path = root.join("merged_pack.zip");
        zip_output_tree(&out_dir, &zip_path).unwrap();

        let data = std::fs::read(&zip_path).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["assets/minecraft/a.png", "pack.mcmeta"]);

        let mut content = Vec::new();
        archive
            .by_name("assets/minecraft/a.png")
            .unwrap()
            .read_to_end(&mut content)
            .unwrap();
        assert_eq!(content, b"bytes");
    }
}
