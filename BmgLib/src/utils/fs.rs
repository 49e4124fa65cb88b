//! File system utilities

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Create or truncate `path` and write `data` to it.
///
/// New files are readable and writable by the owner only on Unix.
pub fn write_user_file<P: AsRef<Path>>(path: P, data: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.flush()
}
