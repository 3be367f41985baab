use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

/// Buffered writer to `<path>.tmp` that is renamed to `path` by `commit()`.
/// If dropped without commit, the temporary file is removed so no half
/// written output is left behind
pub struct AtomicWriter {
    wrt: Option<BufWriter<File>>,
    tmp: PathBuf,
    path: PathBuf,
    committed: bool,
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(".tmp");
    PathBuf::from(s)
}

impl AtomicWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_owned();
        let tmp = tmp_path(&path);
        let wrt = BufWriter::new(File::create(&tmp)?);
        debug!("Opened {} for output", tmp.display());
        Ok(Self {
            wrt: Some(wrt),
            tmp,
            path,
            committed: false,
        })
    }

    pub fn commit(mut self) -> io::Result<()> {
        if let Some(wrt) = self.wrt.take() {
            let f = wrt.into_inner().map_err(|e| e.into_error())?;
            f.sync_all()?;
        }
        fs::rename(&self.tmp, &self.path)?;
        self.committed = true;
        debug!("Wrote {}", self.path.display());
        Ok(())
    }

    fn inner(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.wrt
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Writer already closed"))
    }
}

impl Write for AtomicWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner()?.flush()
    }
}

impl Drop for AtomicWriter {
    fn drop(&mut self) {
        // Close the file before removing it
        self.wrt.take();
        if !self.committed {
            if let Err(e) = fs::remove_file(&self.tmp) {
                warn!("Could not remove {}: {}", self.tmp.display(), e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_renames() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("out.tsv");
        let mut w = AtomicWriter::create(&p).unwrap();
        writeln!(w, "hello").unwrap();
        assert!(!p.exists());
        w.commit().unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "hello\n");
        assert!(!tmp_path(&p).exists());
    }

    #[test]
    fn drop_without_commit_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("out.tsv");
        {
            let mut w = AtomicWriter::create(&p).unwrap();
            writeln!(w, "partial").unwrap();
        }
        assert!(!p.exists());
        assert!(!tmp_path(&p).exists());
    }

    #[test]
    fn failed_rename_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("out.tsv");
        // A non-empty directory at the target makes the rename fail
        fs::create_dir(&p).unwrap();
        fs::write(p.join("x"), "x").unwrap();
        let mut w = AtomicWriter::create(&p).unwrap();
        writeln!(w, "data").unwrap();
        assert!(w.commit().is_err());
        assert!(!tmp_path(&p).exists());
        assert!(p.is_dir());
    }
}
