use uplan_core::{Effect, Msg};
use uplan_engine::{EngineHandle, Settlement};

/// Executes core effects on the engine and turns engine settlements back
/// into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Submit {
                    submission_id,
                    request,
                } => self.engine.submit(submission_id, request),
            }
        }
    }

    pub fn try_recv(&self) -> Option<Msg> {
        self.engine.try_recv().map(settled_msg)
    }

    /// Blocks until the next settlement arrives.
    pub fn recv(&self) -> Option<Msg> {
        self.engine.recv().map(settled_msg)
    }
}

fn settled_msg(settlement: Settlement) -> Msg {
    Msg::SubmissionSettled {
        submission_id: settlement.submission_id,
        outcome: settlement.outcome,
    }
}
