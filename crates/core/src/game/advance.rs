//! Tick loop: every live entity decides once per tick, in slotmap key order.

use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub acted: u32,
    pub idle: u32,
}

impl Game {
    /// Runs one full tick. Entities killed earlier in the same tick are skipped.
    pub fn run_tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        for id in self.live_entity_ids() {
            if self.state.player.dead {
                break;
            }
            match self.update(id) {
                Ok(true) => report.acted += 1,
                Ok(false) | Err(_) => report.idle += 1,
            }
        }
        self.tick += 1;
        tracing::trace!(tick = self.tick, acted = report.acted, "tick complete");
        report
    }

    pub fn advance(&mut self, max_ticks: u32) -> AdvanceResult {
        let mut ticks = 0;
        while ticks < max_ticks {
            if self.state.player.dead {
                return AdvanceResult {
                    simulated_ticks: ticks,
                    stop_reason: AdvanceStopReason::PlayerDefeated,
                };
            }
            self.run_tick();
            ticks += 1;
        }
        let stop_reason = if self.state.player.dead {
            AdvanceStopReason::PlayerDefeated
        } else {
            AdvanceStopReason::BudgetExhausted
        };
        AdvanceResult { simulated_ticks: ticks, stop_reason }
    }
}
