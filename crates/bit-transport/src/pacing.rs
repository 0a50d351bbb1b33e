use crate::Result;
use std::time::{Duration, Instant};

// Below this much remaining time we spin instead of sleeping; thread sleeps overshoot
// by far more than a 250us symbol on most kernels.
const SPIN_THRESHOLD: Duration = Duration::from_millis(2);

/// Drive `levels` through `set_level` under the [`crate::BitTransport`] timing contract.
///
/// Each level is held for at least `interval`, measured from when `set_level` returned, and
/// the last level is followed by one extra `interval` of settle time. Returns the first
/// error from `set_level` without emitting the remaining levels.
pub fn pace<F>(levels: &[bool], interval: Duration, mut set_level: F) -> Result<()>
where
    F: FnMut(bool) -> Result<()>,
{
    for &level in levels {
        set_level(level)?;
        hold(Instant::now(), interval);
    }
    hold(Instant::now(), interval);
    Ok(())
}

fn hold(since: Instant, interval: Duration) {
    let deadline = since + interval;
    loop {
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        let remaining = deadline - now;
        if remaining > SPIN_THRESHOLD {
            std::thread::sleep(remaining - SPIN_THRESHOLD);
        } else {
            std::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransportError;

    #[test]
    fn emits_in_order_and_respects_minimum_duration() {
        let levels = [true, false, false, true, true, false];
        let interval = Duration::from_micros(300);
        let mut seen = Vec::new();
        let start = Instant::now();
        pace(&levels, interval, |level| {
            seen.push((level, Instant::now()));
            Ok(())
        })
        .unwrap();
        let elapsed = start.elapsed();

        let order: Vec<bool> = seen.iter().map(|(l, _)| *l).collect();
        assert_eq!(order, levels);
        for pair in seen.windows(2) {
            assert!(pair[1].1 - pair[0].1 >= interval);
        }
        // every level plus the settle interval
        assert!(elapsed >= interval * (levels.len() as u32 + 1));
    }

    #[test]
    fn stops_on_first_error() {
        let mut calls = 0;
        let res = pace(&[true, true, true], Duration::from_micros(10), |_| {
            calls += 1;
            if calls == 2 {
                Err(TransportError::Gpio("pin gone".into()))
            } else {
                Ok(())
            }
        });
        assert!(matches!(res, Err(TransportError::Gpio(_))));
        assert_eq!(calls, 2);
    }

    #[test]
    fn empty_sequence_still_settles() {
        let interval = Duration::from_millis(3);
        let start = Instant::now();
        pace(&[], interval, |_| Ok(())).unwrap();
        assert!(start.elapsed() >= interval);
    }
}
