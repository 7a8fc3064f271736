use std::cell::RefCell;

use crate::error::{DuiError, Result};

use super::Toolkit;

// ---------------------------------------------------------------------------
// Thread-local toolkit slot
// ---------------------------------------------------------------------------

thread_local! {
    static TOOLKIT: RefCell<Option<Box<dyn Toolkit>>> = RefCell::new(None);
}

/// Install `toolkit` for the current thread, returning the one it replaces.
pub fn install(toolkit: impl Toolkit + 'static) -> Option<Box<dyn Toolkit>> {
    TOOLKIT.with(|slot| slot.borrow_mut().replace(Box::new(toolkit)))
}

/// Install `toolkit` unless another one is already installed on this thread.
pub fn try_install(toolkit: impl Toolkit + 'static) -> Result<()> {
    TOOLKIT.with(|slot| {
        let mut slot = slot.try_borrow_mut().map_err(|_| DuiError::ToolkitBusy)?;
        if slot.is_some() {
            return Err(DuiError::AlreadyInstalled);
        }
        *slot = Some(Box::new(toolkit));
        Ok(())
    })
}

/// Remove the toolkit installed on the current thread.
pub fn uninstall() -> Option<Box<dyn Toolkit>> {
    TOOLKIT
        .try_with(|slot| slot.borrow_mut().take())
        .ok()
        .flatten()
}

pub fn is_installed() -> bool {
    TOOLKIT
        .try_with(|slot| slot.try_borrow().map(|tk| tk.is_some()).unwrap_or(true))
        .unwrap_or(false)
}

/// Run `f` against the current thread's toolkit.
///
/// Fails with [`DuiError::NoToolkit`] when nothing is installed (or the
/// thread is tearing down) and with [`DuiError::ToolkitBusy`] when called
/// from inside another `with_toolkit` closure.
pub fn with_toolkit<R>(f: impl FnOnce(&mut dyn Toolkit) -> R) -> Result<R> {
    TOOLKIT
        .try_with(|slot| {
            let mut slot = slot.try_borrow_mut().map_err(|_| DuiError::ToolkitBusy)?;
            let toolkit = slot.as_mut().ok_or(DuiError::NoToolkit)?;
            Ok(f(&mut **toolkit))
        })
        .unwrap_or(Err(DuiError::NoToolkit))
}
