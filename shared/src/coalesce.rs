// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Duration, Utc};

/// What the host should do with a submitted write.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission<T> {
	/// Write this value now; it opens a new window.
	Immediate(T),
	/// The value is held. Call [`Coalescer::flush`] once this much time has passed.
	Deferred(Duration),
	/// A flush is already scheduled and will write this value instead of the one it was scheduled for.
	Superseded,
	/// Identical to what was last written; nothing to do.
	Unchanged,
}

/// Rate-limits writes of a value, such as browser history entries.
///
/// The first write of a burst goes through immediately. Anything submitted within the window after a write is held,
/// with newer values replacing older ones, and is written once when the window closes. The last submitted value is
/// always written eventually, provided the host calls [`Coalescer::flush`] when asked to.
#[derive(Debug)]
pub struct Coalescer<T> {
	window: Duration,
	last_write_at: Option<DateTime<Utc>>,
	last_written: Option<T>,
	pending: Option<T>,
}

impl<T: Clone + PartialEq> Coalescer<T> {
	pub fn new(window: Duration) -> Self {
		Self {
			window,
			last_write_at: None,
			last_written: None,
			pending: None,
		}
	}

	pub fn submit(&mut self, value: T, now: DateTime<Utc>) -> Submission<T> {
		if self.pending.is_some() {
			self.pending = Some(value);
			return Submission::Superseded;
		}
		if self.last_written.as_ref() == Some(&value) {
			return Submission::Unchanged;
		}

		match self.last_write_at {
			Some(last_write_at) if now - last_write_at < self.window => {
				self.pending = Some(value);
				Submission::Deferred(last_write_at + self.window - now)
			}
			_ => {
				self.record_write(value.clone(), now);
				Submission::Immediate(value)
			}
		}
	}

	/// Takes the held value, if there is one that still needs writing.
	pub fn flush(&mut self, now: DateTime<Utc>) -> Option<T> {
		let value = self.pending.take()?;
		if self.last_written.as_ref() == Some(&value) {
			return None;
		}
		self.record_write(value.clone(), now);
		Some(value)
	}

	pub fn has_pending(&self) -> bool {
		self.pending.is_some()
	}

	fn record_write(&mut self, value: T, now: DateTime<Utc>) {
		self.last_write_at = Some(now);
		self.last_written = Some(value);
	}
}
