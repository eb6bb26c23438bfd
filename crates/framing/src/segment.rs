//! Partitioning the sample sequence into per-video-frame batches.

/// Samples aligned with one video frame: `floor(imu_rate / fps)`.
///
/// No remainder is carried between frames, so a rate that does not divide
/// evenly drifts by the truncated fraction every frame.
pub fn samples_per_frame(imu_sample_rate: f64, video_frame_rate: f64) -> usize {
    (imu_sample_rate / video_frame_rate).floor() as usize
}

/// Cuts a sequence into consecutive, non-overlapping, equal-size batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSegmenter {
    samples_per_frame: usize,
}

impl FrameSegmenter {
    pub fn new(samples_per_frame: usize) -> Self {
        Self { samples_per_frame }
    }

    pub fn from_rates(imu_sample_rate: f64, video_frame_rate: f64) -> Self {
        Self::new(samples_per_frame(imu_sample_rate, video_frame_rate))
    }

    pub fn samples_per_frame(&self) -> usize {
        self.samples_per_frame
    }

    /// Number of full batches in `len` samples. Zero when a batch is empty.
    pub fn frame_count(&self, len: usize) -> usize {
        len.checked_div(self.samples_per_frame).unwrap_or(0)
    }

    /// Trailing samples that do not fill a last batch.
    pub fn dropped_samples(&self, len: usize) -> usize {
        len - self.frame_count(len) * self.samples_per_frame
    }

    /// Full batches in order, covering `[0, frame_count * samples_per_frame)`.
    pub fn segments<'a, T>(&self, items: &'a [T]) -> std::slice::Chunks<'a, T> {
        let covered = self.frame_count(items.len()) * self.samples_per_frame;
        items[..covered].chunks(self.samples_per_frame.max(1))
    }
}
