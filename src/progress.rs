// src/progress.rs
/// Lightweight progress reporting used by the long-running stages (search/detail).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start of a stage with the number of items (if known).
    fn begin(&mut self, _stage: &str, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One unit finished (a search page, a project reference).
    fn item_done(&mut self, _item: &str) {}

    /// One unit failed and was skipped.
    fn item_failed(&mut self, _item: &str, _reason: &str) {}

    /// Called at the end of the stage.
    fn finish(&mut self) {}
}

