//! Detach from the controlling terminal.
//!
//! Thin wrapper over `daemon(3)`: the process forks, starts a new session,
//! changes directory to `/`, and points stdin/stdout/stderr at `/dev/null`.

use anyhow::{Result, bail};

/// Detach the current process.  Only the child returns.
pub fn detach() -> Result<()> {
    // SAFETY: daemon(3) takes two plain ints and touches no Rust-owned
    // memory.  Called before any thread is spawned.
    let rc = unsafe { libc::daemon(0, 0) };
    if rc != 0 {
        bail!("daemon(3) failed: {}", std::io::Error::last_os_error());
    }
    Ok(())
}
