/// Receives progress notifications while a body is copied.
///
/// `progress` is called after every buffer written to the sink, with the cumulative
/// byte count and the declared total, if known. Any `FnMut(u64, Option<u64>)` is a
/// `StreamProgress`:
///
/// ```
/// use micro_client::body::StreamProgress;
///
/// let mut reported = Vec::new();
/// let mut progress = |transferred: u64, _total: Option<u64>| reported.push(transferred);
/// progress.progress(512, Some(1024));
/// assert_eq!(reported, [512]);
/// ```
pub trait StreamProgress {
    /// Called once before the first byte is read.
    fn start(&mut self) {}

    fn progress(&mut self, transferred: u64, total: Option<u64>);

    /// Called once after the copy completed.
    fn finish(&mut self) {}
}

impl<F> StreamProgress for F
where
    F: FnMut(u64, Option<u64>),
{
    fn progress(&mut self, transferred: u64, total: Option<u64>) {
        self(transferred, total);
    }
}

/// A [`StreamProgress`] that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl StreamProgress for NoProgress {
    #[inline]
    fn progress(&mut self, _transferred: u64, _total: Option<u64>) {}
}
