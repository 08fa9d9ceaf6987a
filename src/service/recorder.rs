//! Background persistence of finished calculations.
//!
//! The front end casts [`RecorderMessage::Record`] and never awaits the
//! outcome; the display already shows the evaluated result by then. Each
//! attempt settles into a [`RecorderEvent`] on the notification channel,
//! where subscribers refresh their history view or show a transient
//! failure notice. A failed append never stops the actor.

use ractor::{Actor, ActorProcessingErr, ActorRef};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::api::history_client::HistoryClient;
use crate::db::models::{Calculation, NewCalculation};

/// Public messages handled by the recorder actor.
#[derive(Debug)]
pub enum RecorderMessage {
    /// Persist one finished calculation; fire-and-forget.
    Record(NewCalculation),
}

/// Notifications emitted after a record attempt settles.
#[derive(Debug, Clone)]
pub enum RecorderEvent {
    Recorded(Calculation),
    Failed(String),
}

/// Handle for interacting with the recorder actor.
#[derive(Clone)]
pub struct RecorderHandle {
    actor: ActorRef<RecorderMessage>,
    events: broadcast::Sender<RecorderEvent>,
}

impl RecorderHandle {
    /// Queue one calculation for persistence without waiting on it.
    pub fn record(&self, calculation: NewCalculation) {
        let _ = ractor::cast!(self.actor, RecorderMessage::Record(calculation));
    }

    /// Subscribe to settled record attempts.
    pub fn subscribe(&self) -> broadcast::Receiver<RecorderEvent> {
        self.events.subscribe()
    }
}

struct RecorderActorState {
    client: HistoryClient,
    events: broadcast::Sender<RecorderEvent>,
}

struct RecorderActor;

#[ractor::async_trait]
impl Actor for RecorderActor {
    type Msg = RecorderMessage;
    type State = RecorderActorState;
    type Arguments = (HistoryClient, broadcast::Sender<RecorderEvent>);

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        arguments: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let (client, events) = arguments;
        Ok(RecorderActorState { client, events })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            RecorderMessage::Record(calculation) => {
                match state.client.create(&calculation).await {
                    Ok(created) => {
                        info!(id = created.id, expression = %created.expression, "calculation recorded");
                        let _ = state.events.send(RecorderEvent::Recorded(created));
                    }
                    Err(e) => {
                        warn!(
                            expression = %calculation.expression,
                            error = %e,
                            "failed to record calculation"
                        );
                        let _ = state.events.send(RecorderEvent::Failed(format!(
                            "could not save \"{}\"",
                            calculation.expression
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Async spawn of the recorder actor and return a handle.
pub async fn spawn(client: HistoryClient) -> RecorderHandle {
    let (events, _) = broadcast::channel(16);
    // Anonymous spawn: sessions and tests may run several recorders in one
    // process, so the actor stays out of the global name registry.
    let (actor, _jh) = Actor::spawn(None, RecorderActor, (client, events.clone()))
        .await
        .expect("failed to spawn HistoryRecorder");
    RecorderHandle { actor, events }
}
