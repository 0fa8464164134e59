use super::Backend;
use crate::error::Result;
use crate::theme::Palette;

/// Scoped ownership of an initialized backend.
///
/// `acquire` runs `init`; if init fails part way, `teardown` still runs before
/// the error is returned. Once acquired, teardown runs exactly once: either via
/// `release` (which reports errors) or on drop (which logs them).
pub struct Session<'a> {
    backend: &'a mut dyn Backend,
    released: bool,
}

impl<'a> Session<'a> {
    pub fn acquire(backend: &'a mut dyn Backend, palette: &Palette) -> Result<Self> {
        if let Err(e) = backend.init(palette) {
            if let Err(teardown_err) = backend.teardown() {
                tracing::warn!("teardown after failed init also failed: {}", teardown_err);
            }
            return Err(e.into());
        }
        tracing::debug!("terminal backend initialized");
        Ok(Self {
            backend,
            released: false,
        })
    }

    pub fn backend(&mut self) -> &mut dyn Backend {
        &mut *self.backend
    }

    /// Tear down now and surface any error
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.backend.teardown()?;
        tracing::debug!("terminal backend restored");
        Ok(())
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.backend.teardown() {
            tracing::warn!("failed to restore terminal: {}", e);
        }
    }
}
