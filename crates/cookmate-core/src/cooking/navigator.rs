//! Step navigation and completion tracking.

use crate::recipe::{Recipe, Step};
use std::collections::BTreeSet;

/// Tracks the current step and which steps the cook has marked done.
///
/// Navigation and completion are independent: a step can be completed without
/// being current, and the current step can move on without being completed.
#[derive(Debug, Clone, Default)]
pub struct StepNavigator {
    steps: Vec<Step>,
    current: usize,
    completed: BTreeSet<usize>,
}

impl StepNavigator {
    /// Creates a navigator over `steps` in the order given.
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            current: 0,
            completed: BTreeSet::new(),
        }
    }

    /// Creates a navigator over the recipe's steps in step-number order.
    pub fn for_recipe(recipe: &Recipe) -> Self {
        Self::new(recipe.sorted_steps())
    }

    /// Moves to `index`, clamped to the valid range.
    ///
    /// Out-of-range input (including negative values) is clipped rather than
    /// rejected. With no steps the index stays at 0.
    pub fn go_to(&mut self, index: i64) -> usize {
        let last = self.steps.len().saturating_sub(1) as i64;
        self.current = index.clamp(0, last) as usize;
        self.current
    }

    /// Advances one step. Returns false at the last step.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.steps.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one step. Returns false at the first step.
    pub fn previous(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Flips completion of `index`. Returns whether it is now complete.
    pub fn toggle_complete(&mut self, index: usize) -> bool {
        if self.completed.remove(&index) {
            false
        } else {
            self.completed.insert(index);
            true
        }
    }

    pub fn toggle_current_complete(&mut self) -> bool {
        self.toggle_complete(self.current)
    }

    /// Estimated minutes left, assuming every step takes the same share of
    /// `total_minutes`. The current step counts as remaining.
    pub fn estimate_time_remaining(&self, total_minutes: u32) -> u32 {
        estimate_time_remaining(self.steps.len(), self.current, total_minutes)
    }

    /// Fraction of steps marked complete, in `[0.0, 1.0]`.
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        let done = self.completed.iter().filter(|i| **i < self.steps.len()).count();
        done as f64 / self.steps.len() as f64
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.current)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn completed(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    pub fn is_complete(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    /// True at the final step, and also when there are no steps.
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }
}

/// `ceil(total_minutes / step_count * (step_count - current))`, or 0 without steps.
pub fn estimate_time_remaining(step_count: usize, current: usize, total_minutes: u32) -> u32 {
    if step_count == 0 {
        return 0;
    }
    let average = f64::from(total_minutes) / step_count as f64;
    let remaining_steps = step_count.saturating_sub(current) as f64;
    (average * remaining_steps).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(count: u32) -> Vec<Step> {
        (1..=count).map(|n| Step::new(n, format!("Step {n}"))).collect()
    }

    #[test]
    fn test_go_to_clamps_for_all_sizes() {
        for count in 0..5u32 {
            let mut navigator = StepNavigator::new(steps(count));
            let max = (count as i64 - 1).max(0);
            for index in -3..8i64 {
                let result = navigator.go_to(index) as i64;
                assert_eq!(result, index.clamp(0, max), "count={count} index={index}");
                assert_eq!(navigator.current_index() as i64, result);
            }
        }
    }

    #[test]
    fn test_go_to_extreme_values() {
        let mut navigator = StepNavigator::new(steps(3));
        assert_eq!(navigator.go_to(i64::MAX), 2);
        assert_eq!(navigator.go_to(i64::MIN), 0);
    }

    #[test]
    fn test_next_and_previous_stop_at_boundaries() {
        let mut navigator = StepNavigator::new(steps(2));
        assert!(navigator.is_first());
        assert!(!navigator.previous());
        assert!(navigator.next());
        assert!(navigator.is_last());
        assert!(!navigator.next());
        assert_eq!(navigator.current_index(), 1);
        assert!(navigator.previous());
        assert_eq!(navigator.current_index(), 0);
    }

    #[test]
    fn test_navigation_without_steps() {
        let mut navigator = StepNavigator::new(Vec::new());
        assert!(!navigator.next());
        assert!(!navigator.previous());
        assert!(navigator.current_step().is_none());
        assert_eq!(navigator.progress(), 0.0);
    }

    #[test]
    fn test_toggle_complete_keeps_odd_toggled_indices() {
        let mut navigator = StepNavigator::new(steps(5));
        for index in [0, 2, 2, 4, 1, 4, 4] {
            navigator.toggle_complete(index);
        }
        let completed: Vec<usize> = navigator.completed().iter().copied().collect();
        assert_eq!(completed, vec![0, 1, 4]);
    }

    #[test]
    fn test_completion_is_independent_of_position() {
        let mut navigator = StepNavigator::new(steps(3));
        navigator.toggle_complete(2);
        assert_eq!(navigator.current_index(), 0);
        navigator.next();
        assert!(!navigator.is_complete(0));
        assert!(navigator.toggle_current_complete());
        assert_eq!(navigator.progress(), 2.0 / 3.0);
    }

    #[test]
    fn test_recipe_steps_are_sorted_on_load() {
        let recipe = Recipe {
            id: 1,
            title: "Omelette".to_string(),
            description: None,
            steps: vec![Step::new(2, "b"), Step::new(1, "a")],
            preparation_time: None,
            cooking_time: None,
            servings: None,
        };
        let navigator = StepNavigator::for_recipe(&recipe);
        assert_eq!(navigator.current_step().unwrap().instruction_text, "a");
        assert_eq!(navigator.steps()[1].instruction_text, "b");
    }

    #[test]
    fn test_estimate_time_remaining() {
        assert_eq!(estimate_time_remaining(0, 0, 45), 0);
        assert_eq!(estimate_time_remaining(3, 0, 45), 45);
        assert_eq!(estimate_time_remaining(3, 1, 45), 30);
        assert_eq!(estimate_time_remaining(3, 2, 10), 4);
        assert_eq!(estimate_time_remaining(4, 0, 0), 0);

        let mut navigator = StepNavigator::new(steps(4));
        navigator.go_to(3);
        assert_eq!(navigator.estimate_time_remaining(20), 5);
    }
}
