//! Deferred work that runs on the runtime's next turn.

use std::collections::VecDeque;

use crate::commands::Cmd;

/// FIFO of deferred commands
///
/// A turn drains only what was queued before it started; tasks queued while a
/// turn runs wait for the following one.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: VecDeque<Cmd>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: Cmd) {
        self.tasks.push_back(cmd);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Take everything queued so far
    pub fn take_turn(&mut self) -> Vec<Cmd> {
        self.tasks.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::SlotId;

    #[test]
    fn test_turn_drains_in_order() {
        let mut queue = TaskQueue::new();
        queue.push(Cmd::Focus(SlotId::Term(0)));
        queue.push(Cmd::ReportValidity(SlotId::Term(0)));

        let turn = queue.take_turn();
        assert_eq!(
            turn,
            vec![
                Cmd::Focus(SlotId::Term(0)),
                Cmd::ReportValidity(SlotId::Term(0))
            ]
        );
        assert!(queue.is_empty());
    }
}
