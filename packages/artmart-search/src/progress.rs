/// Number of progress steps reported over one batch run.
const STEP_COUNT: u64 = 10;

/// Coarse progress reporting for long batch jobs. Emits at most
/// [`STEP_COUNT`] evenly spaced log lines plus a completion line, so a full
/// reindex over millions of documents stays readable in the logs.
#[derive(Clone, Debug)]
pub struct BatchProgress {
	label: &'static str,
	total: u64,
	step: u64,
	processed: u64,
}

impl BatchProgress {
	pub fn new(label: &'static str, total: u64) -> Self {
		Self { label, total, step: (total / STEP_COUNT).max(1), processed: 0 }
	}

	/// Advances by `count` items. Returns `true` when a step boundary was
	/// crossed and a progress line was logged.
	pub fn record(&mut self, count: u64) -> bool {
		let before = self.processed;

		self.processed += count;

		let crossed = self.processed / self.step > before / self.step;

		if crossed {
			tracing::info!(
				"{}: {}/{} ({}%).",
				self.label,
				self.processed,
				self.total,
				if self.total == 0 { 100 } else { self.processed * 100 / self.total },
			);
		}

		crossed
	}

	pub fn finish(&self) {
		tracing::info!("{}: completed {} items.", self.label, self.processed);
	}

	pub fn processed(&self) -> u64 {
		self.processed
	}
}
