use std::convert::Infallible;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::SystemTime;

use super::STREAM_CHUNK_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileInfo {
    pub name: String,
    pub size: u64,
    pub is_dir: bool,
    pub readable: bool,
    pub writable: bool,
    pub executable: bool,
    pub created: SystemTime,
}

impl LocalFileInfo {
    /// `{d|-}{r|-}{w|-}{x|-}`
    pub fn permissions(&self) -> String {
        [
            (self.is_dir, 'd'),
            (self.readable, 'r'),
            (self.writable, 'w'),
            (self.executable, 'x'),
        ]
        .into_iter()
        .map(|(set, c)| if set { c } else { '-' })
        .collect()
    }
}

/// Stat `path`. Directory sizes are the sum of every file below them.
///
/// A symbolic link whose target is missing is described by the link itself.
pub fn local_stat(path: &Path) -> io::Result<LocalFileInfo> {
    let metadata = fs::metadata(path).or_else(|_| fs::symlink_metadata(path))?;
    let name = path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |n| n.to_string_lossy().into_owned(),
    );
    let size = if metadata.is_dir() {
        directory_size(path)
    } else {
        metadata.len()
    };
    // Not every filesystem records a birth time.
    let created = metadata.created().or_else(|_| metadata.modified())?;

    Ok(LocalFileInfo {
        name,
        size,
        is_dir: metadata.is_dir(),
        readable: access::readable(path),
        writable: access::writable(path),
        executable: access::executable(path),
        created,
    })
}

/// One level of `path`, sorted by name. Entries that cannot be stat'ed are
/// left out.
pub fn local_readdir(path: &Path) -> io::Result<Vec<LocalFileInfo>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        match local_stat(&entry.path()) {
            Ok(info) => entries.push(info),
            Err(e) => tracing::debug!("skipping {}: {}", entry.path().display(), e),
        }
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Something met during [`walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent<'a> {
    /// About to descend into a directory.
    Directory { path: &'a Path, depth: usize },
    /// A non-directory entry and its length in bytes.
    File { path: &'a Path, size: u64, depth: usize },
}

/// Depth-first walk of everything below `dir`, children in name order.
///
/// Entries directly inside `dir` are reported at `depth`, their children at
/// `depth + 1` and so on. Symbolic links are never followed into
/// directories. Subdirectories that cannot be read are reported but not
/// descended; only a failure to read `dir` itself is returned.
pub fn walk<E, F>(dir: &Path, depth: usize, visit: &mut F) -> Result<io::Result<()>, E>
where
    F: FnMut(WalkEvent<'_>) -> Result<(), E>,
{
    let mut children: Vec<_> = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir.filter_map(Result::ok).collect(),
        Err(e) => return Ok(Err(e)),
    };
    children.sort_by_key(fs::DirEntry::file_name);

    for child in children {
        let path = child.path();
        let Ok(file_type) = child.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            visit(WalkEvent::Directory { path: &path, depth })?;
            if let Err(e) = walk(&path, depth + 1, visit)? {
                tracing::debug!("not descending into {}: {}", path.display(), e);
            }
        } else {
            let size = match fs::metadata(&path) {
                Ok(metadata) if metadata.is_file() => metadata.len(),
                _ => 0,
            };
            visit(WalkEvent::File { path: &path, size, depth })?;
        }
    }

    Ok(Ok(()))
}

/// Total size of every file below `dir`.
pub fn directory_size(dir: &Path) -> u64 {
    let mut total = 0u64;
    let walked: Result<_, Infallible> = walk(dir, 1, &mut |event| {
        if let WalkEvent::File { size, .. } = event {
            total += size;
        }
        Ok(())
    });
    match walked {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::debug!("cannot size {}: {}", dir.display(), e),
        Err(never) => match never {},
    }
    total
}

/// Stream `from` into `to` through a fixed-size buffer, truncating `to`.
pub fn local_copy(from: &Path, to: &Path) -> io::Result<u64> {
    let mut source = File::open(from)?;
    let mut target = File::create(to)?;
    let mut buffer = [0u8; STREAM_CHUNK_SIZE];
    let mut copied = 0u64;

    loop {
        let n = match source.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        target.write_all(&buffer[..n])?;
        copied += n as u64;
    }

    target.flush()?;
    Ok(copied)
}

/// Fill `buffer` as far as possible; short only at end of input.
pub fn read_full(reader: &mut impl Read, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Whether both paths name the same file, hard links included.
#[cfg(unix)]
pub fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => (a.dev(), a.ino()) == (b.dev(), b.ino()),
        _ => false,
    }
}

#[cfg(not(unix))]
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

pub fn local_mkdir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(unix)]
#[allow(unsafe_code)]
mod access {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;
    use std::path::Path;

    fn check(path: &Path, mode: libc::c_int) -> bool {
        let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
            return false;
        };
        // SAFETY: `c_path` is a valid NUL-terminated string for the call.
        unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
    }

    pub fn readable(path: &Path) -> bool {
        check(path, libc::R_OK)
    }

    pub fn writable(path: &Path) -> bool {
        check(path, libc::W_OK)
    }

    pub fn executable(path: &Path) -> bool {
        check(path, libc::X_OK)
    }
}

#[cfg(not(unix))]
mod access {
    use std::path::Path;

    pub fn readable(path: &Path) -> bool {
        path.metadata().is_ok()
    }

    pub fn writable(path: &Path) -> bool {
        path.metadata().is_ok_and(|m| !m.permissions().readonly())
    }

    pub fn executable(path: &Path) -> bool {
        path.is_dir()
    }
}
