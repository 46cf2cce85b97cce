//! Unit tests for th-schedule.

#[cfg(test)]
mod timer_queue {
    use th_core::{AgentId, SimTime};

    use crate::TimerQueue;

    #[test]
    fn drains_only_due_timers() {
        let mut q = TimerQueue::new();
        q.push(SimTime(12.0), AgentId(0));
        q.push(SimTime(5.0), AgentId(1));
        q.push(SimTime(30.0), AgentId(2));

        assert_eq!(q.len(), 3);
        assert_eq!(q.next_due(), Some(SimTime(5.0)));

        let fired = q.drain_due(SimTime(12.0));
        assert_eq!(fired, vec![(SimTime(5.0), AgentId(1)), (SimTime(12.0), AgentId(0))]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_due(), Some(SimTime(30.0)));
    }

    #[test]
    fn nothing_fires_early() {
        let mut q = TimerQueue::new();
        q.push(SimTime(10.0), AgentId(0));
        assert!(q.drain_due(SimTime(9.999)).is_empty());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn shared_due_time_keeps_push_order() {
        let mut q = TimerQueue::new();
        q.push(SimTime(3.0), AgentId(4));
        q.push(SimTime(3.0), AgentId(1));
        let fired: Vec<AgentId> = q.drain_due(SimTime(3.0)).into_iter().map(|(_, a)| a).collect();
        assert_eq!(fired, vec![AgentId(4), AgentId(1)]);
        assert!(q.is_empty());
    }

    #[test]
    fn late_drain_fires_overdue() {
        let mut q = TimerQueue::new();
        q.push(SimTime(1.5), AgentId(0));
        assert_eq!(q.drain_due(SimTime(100.0)).len(), 1);
    }

    #[test]
    fn timer_pushed_after_drain_waits_for_next_drain() {
        let mut q = TimerQueue::new();
        assert!(q.drain_due(SimTime(4.0)).is_empty());
        q.push(SimTime(4.0), AgentId(2));
        assert_eq!(q.len(), 1);
        assert_eq!(q.drain_due(SimTime(5.0)), vec![(SimTime(4.0), AgentId(2))]);
    }

    #[test]
    fn empty_queue() {
        let mut q = TimerQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.next_due(), None);
        assert!(q.drain_due(SimTime(1.0)).is_empty());
    }
}
