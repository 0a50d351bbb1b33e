use crate::{pace, BitTransport, Result, TransportError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use time::OffsetDateTime;

/// An in-process transport that records every transmission instead of touching hardware.
///
/// It honors the timing contract, so timing assertions made against it hold for real
/// backends built on [`pace`].
pub struct MockTransport {
    name: String,
    log: TransmissionLog,
}

/// One level as the mock saw it.
#[derive(Clone, Copy, Debug)]
pub struct RecordedLevel {
    pub level: bool,
    pub at: Instant,
}

#[derive(Clone, Debug)]
pub struct Transmission {
    pub started: OffsetDateTime,
    pub interval: Duration,
    pub levels: Vec<RecordedLevel>,
    /// When `output` was about to return, after the settle interval.
    pub finished: Instant,
}

impl Transmission {
    pub fn bits(&self) -> Vec<bool> {
        self.levels.iter().map(|l| l.level).collect()
    }
}

/// Shared handle to what a [`MockTransport`] has emitted. Clones see the same log.
#[derive(Clone, Debug, Default)]
pub struct TransmissionLog {
    inner: Arc<Mutex<Vec<Transmission>>>,
}

impl TransmissionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn last(&self) -> Option<Transmission> {
        self.inner.lock().last().cloned()
    }

    pub fn transmissions(&self) -> Vec<Transmission> {
        self.inner.lock().clone()
    }

    fn push(&self, t: Transmission) {
        self.inner.lock().push(t);
    }
}

impl MockTransport {
    pub fn new(name: &str) -> Self {
        Self::with_log(name, TransmissionLog::new())
    }

    /// Record into an existing log, e.g. one a test holds on to.
    pub fn with_log(name: &str, log: TransmissionLog) -> Self {
        Self {
            name: name.to_string(),
            log,
        }
    }

    /// Construct from driver arguments: an optional instance name.
    pub fn from_args(args: &[String]) -> Result<Self> {
        match args {
            [] => Ok(Self::new("mock0")),
            [name] => Ok(Self::new(name)),
            _ => Err(TransportError::InvalidArgument(
                "mock takes at most one argument: an instance name".to_string(),
            )),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn log(&self) -> TransmissionLog {
        self.log.clone()
    }
}

impl BitTransport for MockTransport {
    fn output(&mut self, levels: &[bool], interval: Duration) -> Result<()> {
        let started = OffsetDateTime::now_utc();
        let mut recorded = Vec::with_capacity(levels.len());
        pace(levels, interval, |level| {
            recorded.push(RecordedLevel {
                level,
                at: Instant::now(),
            });
            Ok(())
        })?;
        tracing::debug!(
            transport = %self.name,
            levels = levels.len(),
            interval_us = interval.as_micros() as u64,
            "mock transmission"
        );
        self.log.push(Transmission {
            started,
            interval,
            levels: recorded,
            finished: Instant::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_levels_in_order() -> anyhow::Result<()> {
        let mut mock = MockTransport::new("test");
        let log = mock.log();
        let levels = [false, true, true, false, true];
        mock.output(&levels, Duration::from_micros(100))?;

        assert_eq!(log.len(), 1);
        let t = log.last().ok_or_else(|| anyhow::anyhow!("no transmission"))?;
        assert_eq!(t.bits(), levels);
        assert_eq!(t.interval, Duration::from_micros(100));
        Ok(())
    }

    #[test]
    fn does_not_return_before_all_levels_elapsed() -> anyhow::Result<()> {
        let mut mock = MockTransport::new("test");
        let log = mock.log();
        let levels = vec![true; 20];
        let interval = Duration::from_micros(250);
        let start = Instant::now();
        mock.output(&levels, interval)?;
        assert!(start.elapsed() >= interval * 20);

        let t = log.last().ok_or_else(|| anyhow::anyhow!("no transmission"))?;
        for pair in t.levels.windows(2) {
            assert!(pair[1].at.duration_since(pair[0].at) >= interval);
        }
        let last = t.levels.last().ok_or_else(|| anyhow::anyhow!("no levels"))?;
        // last level held, then one settle interval
        assert!(t.finished.duration_since(last.at) >= interval * 2);
        Ok(())
    }

    #[test]
    fn from_args_accepts_optional_name() {
        assert_eq!(
            MockTransport::from_args(&[])
                .map(|m| m.name().to_string())
                .ok(),
            Some("mock0".into())
        );
        assert_eq!(
            MockTransport::from_args(&["bench".to_string()])
                .map(|m| m.name().to_string())
                .ok(),
            Some("bench".into())
        );
        assert!(matches!(
            MockTransport::from_args(&["a".to_string(), "b".to_string()]),
            Err(TransportError::InvalidArgument(_))
        ));
    }

    #[test]
    fn shared_log_sees_boxed_transport() -> anyhow::Result<()> {
        let log = TransmissionLog::new();
        let mut boxed: Box<dyn BitTransport> =
            Box::new(MockTransport::with_log("boxed", log.clone()));
        boxed.output(&[true], Duration::from_micros(10))?;
        boxed.output(&[false], Duration::from_micros(10))?;
        assert_eq!(log.len(), 2);
        Ok(())
    }
}
