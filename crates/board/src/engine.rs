//! Effect runner: drives the reducer's effects against a directory.
//!
//! The engine is the only async piece of the board. It owns the state,
//! feeds actions through [`reduce`](crate::reduce), executes the returned
//! effects against the [`StockDirectory`], and turns each outcome back into
//! a follow-up action. Superseded fetches are dropped silently.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::warn;

use stocktrack_client::StockDirectory;
use stocktrack_stock::StockKey;

use crate::reducer::{reduce, BoardAction, Effect};
use crate::state::BoardState;

pub struct BoardEngine {
    state: BoardState,
    directory: Arc<dyn StockDirectory>,
}

impl BoardEngine {
    pub fn new(directory: Arc<dyn StockDirectory>) -> Self {
        Self {
            state: BoardState::new(),
            directory,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Run one action and every effect and follow-up action it triggers,
    /// to quiescence. Iterative so effect chains stay unbounded without
    /// async recursion.
    pub async fn dispatch(&mut self, action: BoardAction) {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            for effect in reduce(&mut self.state, action) {
                if let Some(follow_up) = self.execute(effect).await {
                    queue.push_back(follow_up);
                }
            }
        }
    }

    /// Initial load and manual refresh.
    pub async fn refresh(&mut self) {
        self.dispatch(BoardAction::Refresh).await;
    }

    /// Notification hook for the fault screen: any fault mutation made
    /// there re-syncs the board.
    pub async fn faults_changed(&mut self) {
        self.dispatch(BoardAction::Refresh).await;
    }

    async fn execute(&self, effect: Effect) -> Option<BoardAction> {
        match effect {
            Effect::FetchSnapshot => match self.directory.stock_status().await {
                Ok(rows) => Some(BoardAction::SnapshotLoaded(rows)),
                Err(err) if err.is_abort() => None,
                Err(err) => Some(BoardAction::SnapshotFailed(err.user_message())),
            },
            Effect::FetchFaults => match self.directory.open_stock_faults().await {
                Ok(records) => Some(BoardAction::FaultsLoaded(records)),
                Err(err) if err.is_abort() => None,
                Err(err) => {
                    warn!(error = %err, "fault list fetch failed");
                    Some(BoardAction::FaultsFailed)
                }
            },
            Effect::SubmitMovement(movement) => {
                match self.directory.submit_movement(&movement).await {
                    Ok(()) => Some(BoardAction::MovementCompleted),
                    Err(err) => Some(BoardAction::Failed(err.user_message())),
                }
            }
            Effect::SubmitAssignment(request) => {
                match self.directory.submit_assignment(&request).await {
                    Ok(message) => Some(BoardAction::AssignmentCompleted(message)),
                    Err(err) => Some(BoardAction::Failed(err.user_message())),
                }
            }
            Effect::MarkFault(mark) => match self.directory.mark_fault(&mark).await {
                Ok(()) => Some(BoardAction::FaultUpdated {
                    message: Some("Arıza kaydı oluşturuldu.".into()),
                }),
                Err(err) => Some(BoardAction::Failed(err.user_message())),
            },
            Effect::CloseFault {
                entity_key,
                status,
                best_effort,
            } => match self.directory.close_fault(&entity_key, &status).await {
                Ok(()) if best_effort => Some(BoardAction::FaultUpdated { message: None }),
                Ok(()) => Some(BoardAction::FaultUpdated {
                    message: Some("Kayıt tekrar kullanıma alındı.".into()),
                }),
                Err(err) if best_effort => {
                    // The ledger movement already landed; a missing fault
                    // record must not abort the flow.
                    warn!(error = %err, %entity_key, "fault close after scrap failed");
                    Some(BoardAction::FaultUpdated { message: None })
                }
                Err(err) => Some(BoardAction::Failed(err.user_message())),
            },
            Effect::SystemRoomAdd(keys) => self.system_room_call(true, keys).await,
            Effect::SystemRoomRemove(keys) => self.system_room_call(false, keys).await,
        }
    }

    async fn system_room_call(&self, add: bool, keys: Vec<StockKey>) -> Option<BoardAction> {
        let result = if add {
            self.directory.system_room_add(&keys).await
        } else {
            self.directory.system_room_remove(&keys).await
        };
        match result {
            Ok(()) => Some(BoardAction::SystemRoomUpdated),
            Err(err) => Some(BoardAction::Failed(err.user_message())),
        }
    }
}
