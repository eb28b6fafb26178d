//! Ctrl-C handling.
//!
//! The first interrupt cancels the run's token so the pipeline unwinds at
//! its next checkpoint and nothing is written. A second interrupt gets the
//! platform default behaviour and terminates the process.

use std::sync::OnceLock;

use brewmap_pipeline::CancelToken;

static TOKEN: OnceLock<CancelToken> = OnceLock::new();

/// Route interrupts to `token`. Only the first call has any effect.
pub(crate) fn install(token: &CancelToken) {
    if TOKEN.set(token.clone()).is_ok() {
        platform::install();
    }
}

fn on_interrupt() {
    if let Some(token) = TOKEN.get() {
        token.cancel();
    }
}

#[cfg(unix)]
mod platform {
    extern "C" fn handle_sigint(_signum: libc::c_int) {
        super::on_interrupt();
        unsafe {
            libc::signal(libc::SIGINT, libc::SIG_DFL);
        }
    }

    pub(super) fn install() {
        let handler = handle_sigint as extern "C" fn(libc::c_int);
        unsafe {
            libc::signal(libc::SIGINT, handler as libc::sighandler_t);
        }
    }
}

#[cfg(windows)]
mod platform {
    use std::sync::atomic::{AtomicBool, Ordering};

    use windows_sys::Win32::Foundation::{BOOL, FALSE, TRUE};
    use windows_sys::Win32::System::Console::{
        SetConsoleCtrlHandler, CTRL_BREAK_EVENT, CTRL_C_EVENT,
    };

    static SEEN: AtomicBool = AtomicBool::new(false);

    unsafe extern "system" fn handle_ctrl(ctrl_type: u32) -> BOOL {
        match ctrl_type {
            CTRL_C_EVENT | CTRL_BREAK_EVENT => {
                if SEEN.swap(true, Ordering::SeqCst) {
                    // Fall through to the default handler, which exits
                    return FALSE;
                }
                super::on_interrupt();
                TRUE
            }
            _ => FALSE,
        }
    }

    pub(super) fn install() {
        unsafe {
            SetConsoleCtrlHandler(Some(handle_ctrl), TRUE);
        }
    }
}

#[cfg(not(any(unix, windows)))]
mod platform {
    pub(super) fn install() {}
}
