//! Spawner emission cycle.

/// Emission cycle state for one spawner structure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnerState {
    /// Current ticks between emissions
    pub interval: u32,
    /// Lower bound the interval may accelerate down to
    pub min_interval: u32,
    /// Whether each emission shortens the next interval by one tick
    pub accelerate: bool,
    /// Ticks since the last emission
    pub ticks: u32,
}

impl SpawnerState {
    pub fn new(interval: u32, min_interval: u32, accelerate: bool) -> Self {
        Self {
            interval,
            min_interval,
            accelerate,
            ticks: 0,
        }
    }

    /// Advance one tick. Returns true when an emission is due: the counter
    /// resets and, with acceleration on, the next interval shrinks by one,
    /// never below the floor.
    pub fn advance(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks < self.interval {
            return false;
        }
        self.ticks = 0;
        if self.accelerate && self.interval > self.min_interval {
            self.interval -= 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emission_cadence() {
        let mut state = SpawnerState::new(3, 1, false);
        assert!(!state.advance());
        assert!(!state.advance());
        assert!(state.advance());
        // counter reset, next cycle takes another 3 ticks
        assert!(!state.advance());
        assert!(!state.advance());
        assert!(state.advance());
        assert_eq!(state.interval, 3);
    }

    #[test]
    fn test_acceleration_stops_at_floor() {
        let mut state = SpawnerState::new(6, 5, true);

        for _ in 0..5 {
            assert!(!state.advance());
        }
        assert!(state.advance());
        assert_eq!(state.interval, 5, "first emission tightens the interval");

        for _ in 0..4 {
            assert!(!state.advance());
        }
        assert!(state.advance());
        assert_eq!(state.interval, 5, "floor holds on later emissions");

        for _ in 0..4 {
            assert!(!state.advance());
        }
        assert!(state.advance());
        assert_eq!(state.interval, 5);
    }

    #[test]
    fn test_no_acceleration_keeps_interval() {
        let mut state = SpawnerState::new(7, 5, false);
        for round in 0..3 {
            for _ in 0..6 {
                assert!(!state.advance(), "round {}", round);
            }
            assert!(state.advance());
            assert_eq!(state.interval, 7);
        }
    }
}
