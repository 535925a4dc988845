/// Position of the user within the combined results.
///
/// `current` is 1-based (0 = nothing selected); `total` is `None` until the
/// first search completes. Every change of `current` yields the zero-based
/// index the orchestrator should navigate to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    total: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Forward,
    Back,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> Option<usize> {
        self.total
    }

    /// A new search completed: select the first result, if any
    pub fn set_total(&mut self, total: usize) -> Option<usize> {
        self.total = Some(total);
        if total == 0 {
            self.current = 0;
            None
        } else {
            self.set_current(1)
        }
    }

    /// Force the position without touching the total. Fires even when the
    /// position does not change.
    pub fn set_current(&mut self, current: usize) -> Option<usize> {
        self.current = match self.total {
            Some(total) => current.min(total),
            None => current,
        };
        self.current.checked_sub(1)
    }

    pub fn can_step_forward(&self) -> bool {
        let total = self.total.unwrap_or(0);
        self.current > 0 && self.current < total
    }

    pub fn can_step_back(&self) -> bool {
        self.current > 1
    }

    /// "Show all results" only reacts while at least one direction is open
    pub fn can_show_list(&self) -> bool {
        self.can_step_forward() || self.can_step_back()
    }

    pub fn step(&mut self, step: Step) -> Option<usize> {
        match step {
            Step::Forward if self.can_step_forward() => self.set_current(self.current + 1),
            Step::Back if self.can_step_back() => self.set_current(self.current - 1),
            _ => None,
        }
    }

    pub fn counter_text(&self) -> String {
        match self.total {
            None => String::new(),
            Some(0) => "No results".to_string(),
            Some(total) => format!("{} of {}", self.current, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let navigator = Navigator::new();
        assert_eq!(navigator.current(), 0);
        assert_eq!(navigator.total(), None);
        assert_eq!(navigator.counter_text(), "");
        assert!(!navigator.can_step_forward());
        assert!(!navigator.can_step_back());
    }

    #[test]
    fn test_set_total_selects_first() {
        let mut navigator = Navigator::new();
        assert_eq!(navigator.set_total(3), Some(0));
        assert_eq!(navigator.current(), 1);
        assert_eq!(navigator.counter_text(), "1 of 3");
        assert!(navigator.can_step_forward());
        assert!(!navigator.can_step_back());
    }

    #[test]
    fn test_set_total_zero() {
        let mut navigator = Navigator::new();
        navigator.set_total(4);
        navigator.step(Step::Forward);

        assert_eq!(navigator.set_total(0), None);
        assert_eq!(navigator.current(), 0);
        assert_eq!(navigator.counter_text(), "No results");
        assert!(!navigator.can_step_forward());
        assert!(!navigator.can_step_back());
        assert!(!navigator.can_show_list());
    }

    #[test]
    fn test_step_within_bounds() {
        let mut navigator = Navigator::new();
        navigator.set_total(3);

        assert_eq!(navigator.step(Step::Back), None);
        assert_eq!(navigator.step(Step::Forward), Some(1));
        assert_eq!(navigator.step(Step::Forward), Some(2));
        assert_eq!(navigator.current(), 3);
        assert_eq!(navigator.step(Step::Forward), None);
        assert_eq!(navigator.current(), 3);
        assert_eq!(navigator.step(Step::Back), Some(1));
        assert_eq!(navigator.counter_text(), "2 of 3");
    }

    #[test]
    fn test_current_never_exceeds_total() {
        for total in 0..6usize {
            let mut navigator = Navigator::new();
            navigator.set_total(total);
            for _ in 0..10 {
                navigator.step(Step::Forward);
                assert!(navigator.current() <= total);
            }
            for _ in 0..10 {
                navigator.step(Step::Back);
                assert!(navigator.current() <= total);
                if total > 0 {
                    assert!(navigator.current() >= 1);
                }
            }
            navigator.set_current(total + 5);
            assert!(navigator.current() <= total);
        }
    }

    #[test]
    fn test_set_current_fires_even_when_unchanged() {
        let mut navigator = Navigator::new();
        navigator.set_total(5);
        assert_eq!(navigator.set_current(1), Some(0));
        assert_eq!(navigator.set_current(4), Some(3));
        assert_eq!(navigator.set_current(4), Some(3));
        assert_eq!(navigator.total(), Some(5));
    }
}
