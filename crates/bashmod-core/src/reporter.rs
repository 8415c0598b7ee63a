//! Reporter trait for dependency injection
//!
//! Core operations report progress and status through this trait so they are
//! not coupled to a specific terminal front end.

pub trait Reporter: Send + Sync {
    /// Indicates a new section or phase has started (e.g. "Installing").
    fn section(&self, title: &str);

    /// A module is being downloaded and written.
    fn installing(&self, id: &str, version: &str);

    /// A module is being removed.
    fn removing(&self, id: &str);

    /// Marks a module operation as successfully completed.
    fn done(&self, id: &str, version: &str, detail: &str);

    /// Marks a module operation as failed with a specific reason.
    fn failed(&self, id: &str, reason: &str);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a success message.
    fn success(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn section(&self, title: &str) {
        (**self).section(title);
    }
    fn installing(&self, id: &str, version: &str) {
        (**self).installing(id, version);
    }
    fn removing(&self, id: &str) {
        (**self).removing(id);
    }
    fn done(&self, id: &str, version: &str, detail: &str) {
        (**self).done(id, version, detail);
    }
    fn failed(&self, id: &str, reason: &str) {
        (**self).failed(id, reason);
    }
    fn info(&self, msg: &str) {
        (**self).info(msg);
    }
    fn success(&self, msg: &str) {
        (**self).success(msg);
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg);
    }
}

/// A no-op reporter for silent operations (e.g., testing).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _: &str) {}
    fn installing(&self, _: &str, _: &str) {}
    fn removing(&self, _: &str) {}
    fn done(&self, _: &str, _: &str, _: &str) {}
    fn failed(&self, _: &str, _: &str) {}
    fn info(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warning(&self, _: &str) {}
}
