//! Unit tests for th-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, NodeId};

    #[test]
    fn index_and_conversion() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert!(!NodeId::default().is_valid());
        assert!(NodeId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Position;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(10.0, -4.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Position::new(5.0, -2.0));
    }

    #[test]
    fn lerp_clamps() {
        let a = Position::new(1.0, 1.0);
        let b = Position::new(2.0, 2.0);
        assert_eq!(a.lerp(b, 7.0), b);
        assert_eq!(a.lerp(b, -3.0), a);
    }
}

#[cfg(test)]
mod kind {
    use crate::NodeKind;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Base".parse::<NodeKind>().unwrap(), NodeKind::Base);
        assert_eq!(" mine ".parse::<NodeKind>().unwrap(), NodeKind::Mine);
        assert_eq!("WAYPOINT".parse::<NodeKind>().unwrap(), NodeKind::Waypoint);
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!("depot".parse::<NodeKind>().is_err());
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, SimTime, Tick};

    #[test]
    fn sim_time_ordering() {
        assert!(SimTime(1.0) < SimTime(2.5));
        assert_eq!(SimTime(3.0), SimTime(3.0));
        assert_eq!(SimTime(5.0) - SimTime(2.0), 3.0);
        assert_eq!(SimTime(2.0).since(SimTime(5.0)), 0.0);
    }

    #[test]
    fn clock_applies_time_scale() {
        let mut clock = SimClock::new(0.5, 2.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.now, SimTime(2.0));
    }

    #[test]
    fn paused_clock_still_counts_ticks() {
        let mut clock = SimClock::new(1.0, 0.0);
        clock.advance();
        assert_eq!(clock.current_tick, Tick(1));
        assert_eq!(clock.now, SimTime::ZERO);
    }

    #[test]
    fn fractional_ticks_do_not_drift() {
        let mut clock = SimClock::new(0.1, 1.0);
        for _ in 0..120 {
            clock.advance();
        }
        assert_eq!(clock.now, SimTime(12.0));
    }

    #[test]
    fn time_scale_change_keeps_elapsed_time() {
        let mut clock = SimClock::new(0.1, 1.0);
        for _ in 0..10 {
            clock.advance();
        }
        assert_eq!(clock.now, SimTime(1.0));

        clock.set_time_scale(2.0);
        assert_eq!(clock.now, SimTime(1.0));
        assert_eq!(clock.time_scale(), 2.0);
        for _ in 0..5 {
            clock.advance();
        }
        assert!((clock.now.as_f64() - 2.0).abs() < 1e-12);
        assert_eq!(clock.current_tick, Tick(15));
    }

    #[test]
    fn config_validation() {
        assert!(SimConfig::default().validate().is_ok());

        let zero_tick = SimConfig { tick_duration: 0.0, ..SimConfig::default() };
        assert!(zero_tick.validate().is_err());

        let negative_scale = SimConfig { time_scale: -1.0, ..SimConfig::default() };
        assert!(negative_scale.validate().is_err());
    }

    #[test]
    fn config_end_tick() {
        let cfg = SimConfig { total_ticks: 250, ..SimConfig::default() };
        assert_eq!(cfg.end_tick(), Tick(250));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..50 {
            assert_eq!(a.gen_index(10), b.gen_index(10));
        }
    }

    #[test]
    fn gen_index_bounds() {
        let mut rng = SimRng::new(0);
        assert_eq!(rng.gen_index(0), None);
        for _ in 0..200 {
            assert!(rng.gen_index(3).unwrap() < 3);
        }
    }
}
