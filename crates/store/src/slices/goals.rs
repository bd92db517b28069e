use api_types::goal::Goal;

use crate::Amount;

use super::OpPhase;

/// Savings goals plus their derived totals.
#[derive(Debug, Default)]
pub struct GoalsSlice {
    pub items: Vec<Goal>,
    pub phase: OpPhase,
    pub error: Option<String>,
    pub total_saved: Amount,
    pub total_target: Amount,
}

/// Saved amount after funding `goal` with `amount`, capped at the target.
/// Funding never moves the target itself.
#[must_use]
pub fn funded_saved(goal: &Goal, amount: Amount) -> Amount {
    let target = Amount::from_wire(goal.summ);
    (Amount::from_wire(goal.saved) + amount).min(target)
}

impl GoalsSlice {
    #[must_use]
    pub fn by_id(&self, id: i64) -> Option<&Goal> {
        self.items.iter().find(|g| g.id_ == id)
    }

    pub fn pending(&mut self) {
        self.phase = OpPhase::Pending;
        self.error = None;
    }

    pub fn fetch_fulfilled(&mut self, items: Vec<Goal>) {
        self.items = items;
        self.phase = OpPhase::Fulfilled;
        self.error = None;
        self.recompute();
    }

    pub fn create_fulfilled(&mut self, goal: Goal) {
        self.items.insert(0, goal);
        self.phase = OpPhase::Fulfilled;
        self.error = None;
        self.recompute();
    }

    pub fn update_fulfilled(&mut self, goal: Goal) {
        if let Some(slot) = self.items.iter_mut().find(|g| g.id_ == goal.id_) {
            *slot = goal;
        }
        self.phase = OpPhase::Fulfilled;
        self.error = None;
        self.recompute();
    }

    pub fn delete_fulfilled(&mut self, id: i64) {
        if let Some(pos) = self.items.iter().position(|g| g.id_ == id) {
            self.items.remove(pos);
        }
        self.phase = OpPhase::Fulfilled;
        self.error = None;
        self.recompute();
    }

    pub fn rejected(&mut self, message: String) {
        self.phase = OpPhase::Rejected;
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn recompute(&mut self) {
        let mut saved = Amount::ZERO;
        let mut target = Amount::ZERO;
        for goal in &self.items {
            saved += Amount::from_wire(goal.saved);
            target += Amount::from_wire(goal.summ);
        }
        self.total_saved = saved;
        self.total_target = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(id_: i64, summ: f64, saved: f64) -> Goal {
        Goal {
            id_,
            name: "vacation".to_string(),
            summ,
            saved,
        }
    }

    #[test]
    fn funding_is_capped_at_the_target() {
        let g = goal(1, 500.0, 480.0);
        assert_eq!(funded_saved(&g, Amount::new(10_00)), Amount::new(490_00));
        assert_eq!(funded_saved(&g, Amount::new(50_00)), Amount::new(500_00));
        assert_eq!(funded_saved(&g, Amount::new(10_000_00)), Amount::new(500_00));
    }

    #[test]
    fn funding_an_already_full_goal_stays_at_target() {
        let g = goal(1, 100.0, 100.0);
        assert_eq!(funded_saved(&g, Amount::new(1)), Amount::new(100_00));
    }

    #[test]
    fn totals_track_the_list() {
        let mut slice = GoalsSlice::default();
        slice.fetch_fulfilled(vec![goal(1, 500.0, 100.0), goal(2, 200.0, 50.0)]);
        assert_eq!(slice.total_target, Amount::new(700_00));
        assert_eq!(slice.total_saved, Amount::new(150_00));

        slice.delete_fulfilled(1);
        assert_eq!(slice.items.len(), 1);
        assert_eq!(slice.total_target, Amount::new(200_00));
        assert_eq!(slice.total_saved, Amount::new(50_00));
    }

    #[test]
    fn create_prepends_and_update_replaces() {
        let mut slice = GoalsSlice::default();
        slice.create_fulfilled(goal(1, 100.0, 0.0));
        slice.create_fulfilled(goal(2, 300.0, 0.0));
        assert_eq!(slice.items[0].id_, 2);

        slice.update_fulfilled(goal(1, 100.0, 40.0));
        assert_eq!(slice.by_id(1).map(|g| g.saved), Some(40.0));
        assert_eq!(slice.total_saved, Amount::new(40_00));
    }

    #[test]
    fn rejected_surfaces_the_message() {
        let mut slice = GoalsSlice::default();
        slice.pending();
        slice.rejected("Goal not found".to_string());
        assert_eq!(slice.phase, OpPhase::Rejected);
        assert_eq!(slice.error.as_deref(), Some("Goal not found"));
    }
}
