// SPDX-License-Identifier: MPL-2.0
//! Per-tile gesture disambiguation.
//!
//! A tile's primary action (play / open) is an ordinary short click; its
//! secondary action (cycle watch state) is a long-press or a right-click.
//! This module is the state machine that tells those apart without letting
//! a single physical gesture trigger both.
//!
//! The dwell timer is not a background timer: the router stores a deadline
//! and the application drives [`GestureRouter::tick`] from its periodic
//! tick subscription while a press is in flight. Every exit path (release,
//! pointer leave, cancellation, tile removal) goes through [`release`] or
//! [`cancel`], so a deadline can never outlive its press.
//!
//! [`release`]: GestureRouter::release
//! [`cancel`]: GestureRouter::cancel

use std::time::{Duration, Instant};

/// How long a press must dwell before it becomes a long-press.
pub const LONG_PRESS_DWELL: Duration = Duration::from_millis(450);

/// Press lifecycle of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    /// No press in flight.
    Idle,
    /// Primary button held, dwell deadline armed.
    Pressing { deadline: Instant },
    /// The dwell elapsed and the secondary action already fired; the
    /// release that follows must be swallowed.
    LongPressFired,
}

/// Outcome of a pointer release on the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The press ended before the dwell elapsed: this is a short click,
    /// deliver the primary action.
    PrimaryClick,
    /// The gesture already fired the secondary action (or there was no
    /// press to begin with); nothing further happens.
    Swallowed,
}

/// Gesture state machine for one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureRouter {
    state: PressState,
}

impl GestureRouter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: PressState::Idle,
        }
    }

    /// Whether the tile should render its "pressing" mark. True only
    /// during the dwell, cleared the moment the long-press fires.
    #[must_use]
    pub fn is_pressing(&self) -> bool {
        matches!(self.state, PressState::Pressing { .. })
    }

    /// Whether a dwell deadline is armed (drives the tick subscription).
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.is_pressing()
    }

    /// Primary-button press lands on the tile. Arms the dwell deadline.
    ///
    /// Presses on the tile's stop control never reach this: that control
    /// captures its own pointer events before the tile sees them.
    pub fn press(&mut self, now: Instant) {
        if self.state == PressState::Idle {
            self.state = PressState::Pressing {
                deadline: now + LONG_PRESS_DWELL,
            };
        }
    }

    /// Advances the dwell clock. Returns `true` exactly once per press,
    /// at the moment the dwell elapses; the caller invokes the secondary
    /// action then.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.state {
            PressState::Pressing { deadline } if now >= deadline => {
                self.state = PressState::LongPressFired;
                true
            }
            _ => false,
        }
    }

    /// Pointer released over the tile.
    ///
    /// A release during the dwell is the short click; a release after the
    /// long-press fired is swallowed so one gesture never triggers both
    /// actions. Swallowing is a real transition here, not a side effect:
    /// the router returns to idle either way.
    pub fn release(&mut self) -> ReleaseOutcome {
        let outcome = match self.state {
            PressState::Pressing { .. } => ReleaseOutcome::PrimaryClick,
            PressState::Idle | PressState::LongPressFired => ReleaseOutcome::Swallowed,
        };
        self.state = PressState::Idle;
        outcome
    }

    /// Pointer left the tile, the press was cancelled, or the tile is
    /// going away. Disarms the deadline without invoking anything.
    pub fn cancel(&mut self) {
        self.state = PressState::Idle;
    }

    /// Right-click (context menu) on the tile: the desktop equivalent of a
    /// long-press. Always requests the secondary action, independent of the
    /// dwell state. Returns `true` so the call sites read like `tick`.
    pub fn context_menu(&mut self) -> bool {
        true
    }
}

impl Default for GestureRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> (GestureRouter, Instant) {
        (GestureRouter::new(), Instant::now())
    }

    #[test]
    fn short_press_yields_primary_click() {
        let (mut router, t0) = start();
        router.press(t0);
        assert!(router.is_pressing());

        // Released well before the dwell elapses.
        assert!(!router.tick(t0 + Duration::from_millis(100)));
        assert_eq!(router.release(), ReleaseOutcome::PrimaryClick);
        assert!(!router.is_pressing());
    }

    #[test]
    fn long_press_fires_secondary_exactly_once() {
        let (mut router, t0) = start();
        router.press(t0);

        assert!(router.tick(t0 + LONG_PRESS_DWELL));
        // Further ticks must not re-fire.
        assert!(!router.tick(t0 + LONG_PRESS_DWELL + Duration::from_millis(50)));
        assert!(!router.tick(t0 + LONG_PRESS_DWELL + Duration::from_secs(5)));
    }

    #[test]
    fn long_press_swallows_the_following_release() {
        let (mut router, t0) = start();
        router.press(t0);
        assert!(router.tick(t0 + LONG_PRESS_DWELL));

        assert_eq!(router.release(), ReleaseOutcome::Swallowed);
        // The swallow is a transition: the next press starts clean.
        router.press(t0 + Duration::from_secs(1));
        assert!(router.is_pressing());
    }

    #[test]
    fn one_gesture_never_triggers_both_actions() {
        // Long-press path: secondary fired, primary must not follow.
        let (mut router, t0) = start();
        router.press(t0);
        let fired = router.tick(t0 + LONG_PRESS_DWELL);
        let outcome = router.release();
        assert!(fired);
        assert_eq!(outcome, ReleaseOutcome::Swallowed);

        // Short-click path: primary delivered, secondary never fired.
        let (mut router, t0) = start();
        router.press(t0);
        let fired = router.tick(t0 + Duration::from_millis(200));
        let outcome = router.release();
        assert!(!fired);
        assert_eq!(outcome, ReleaseOutcome::PrimaryClick);
    }

    #[test]
    fn pressing_mark_clears_when_the_dwell_fires() {
        let (mut router, t0) = start();
        router.press(t0);
        assert!(router.is_pressing());
        router.tick(t0 + LONG_PRESS_DWELL);
        assert!(!router.is_pressing());
    }

    #[test]
    fn cancel_disarms_without_invoking_anything() {
        let (mut router, t0) = start();
        router.press(t0);
        router.cancel();

        assert!(!router.is_pressing());
        // A tick after cancellation must not fire the stale deadline.
        assert!(!router.tick(t0 + LONG_PRESS_DWELL + Duration::from_secs(1)));
        // And a release after cancellation is not a click.
        assert_eq!(router.release(), ReleaseOutcome::Swallowed);
    }

    #[test]
    fn release_without_press_is_swallowed() {
        let (mut router, _) = start();
        assert_eq!(router.release(), ReleaseOutcome::Swallowed);
    }

    #[test]
    fn press_while_already_pressing_keeps_the_first_deadline() {
        let (mut router, t0) = start();
        router.press(t0);
        router.press(t0 + Duration::from_millis(400));

        // Fires at the original deadline, not a re-armed one.
        assert!(router.tick(t0 + LONG_PRESS_DWELL));
    }

    #[test]
    fn context_menu_requests_secondary_unconditionally() {
        let (mut router, _) = start();
        assert!(router.context_menu());

        // Also independent of an in-flight dwell.
        let (mut router, t0) = start();
        router.press(t0);
        assert!(router.context_menu());
    }
}
