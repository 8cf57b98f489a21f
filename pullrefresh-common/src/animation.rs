//! Return-to-rest animation

use std::time::Duration;

use crate::config::Easing;

/// Identifies one reset animation; frames for an older ticket are stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub(crate) u64);

/// Animation of the target element from `from` back to offset 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResetAnimation {
    pub ticket: Ticket,
    pub from: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl ResetAnimation {
    /// Offset to show `elapsed` into the animation
    pub fn offset_at(&self, elapsed: Duration) -> f64 {
        self.from * (1.0 - self.easing.apply(self.progress(elapsed)))
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animation(easing: Easing) -> ResetAnimation {
        ResetAnimation {
            ticket: Ticket(1),
            from: 60.0,
            duration: Duration::from_millis(200),
            easing,
        }
    }

    #[test]
    fn test_linear_offsets() {
        let anim = animation(Easing::Linear);
        assert_eq!(anim.offset_at(Duration::ZERO), 60.0);
        assert!((anim.offset_at(Duration::from_millis(50)) - 45.0).abs() < 1e-9);
        assert!((anim.offset_at(Duration::from_millis(100)) - 30.0).abs() < 1e-9);
        assert_eq!(anim.offset_at(Duration::from_millis(200)), 0.0);
        assert_eq!(anim.offset_at(Duration::from_secs(5)), 0.0);
    }

    #[test]
    fn test_swing_is_monotonic_and_bounded() {
        let anim = animation(Easing::Swing);
        let mut last = f64::MAX;
        for ms in (0..=200).step_by(10) {
            let offset = anim.offset_at(Duration::from_millis(ms));
            assert!(offset <= last);
            assert!((0.0..=60.0).contains(&offset));
            last = offset;
        }
        assert!(last.abs() < 1e-9);
    }

    #[test]
    fn test_zero_duration() {
        let anim = ResetAnimation {
            duration: Duration::ZERO,
            ..animation(Easing::Linear)
        };
        assert_eq!(anim.progress(Duration::ZERO), 1.0);
        assert!(anim.is_finished(Duration::ZERO));
        assert_eq!(anim.offset_at(Duration::ZERO), 0.0);
    }
}
