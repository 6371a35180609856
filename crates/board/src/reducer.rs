//! Pure command dispatch: `(state, action) -> effects`.
//!
//! Every user gesture and every completed network call enters as a
//! [`BoardAction`]; [`reduce`] mutates the [`BoardState`] and returns the
//! [`Effect`]s to run next. No IO happens in here, which is what makes the
//! flows testable without a server.

use stocktrack_assign::AssignmentRequest;
use stocktrack_client::FaultMark;
use stocktrack_stock::{
    fault_key, fault_label, fault_meta, FaultOverlay, FaultRecord, RawStockRow, StockKey,
    StockMovement, StockRow,
};

use crate::state::{Banner, BoardState};

/// Terminal fault status written by a repair call.
pub const FAULT_STATUS_REPAIRED: &str = "tamir_edildi";
/// Terminal fault status written when the faulty unit is scrapped.
pub const FAULT_STATUS_SCRAPPED: &str = "hurda";

/// Everything that can happen to the board.
#[derive(Debug, Clone)]
pub enum BoardAction {
    Refresh,
    SnapshotLoaded(Vec<RawStockRow>),
    SnapshotFailed(String),
    FaultsLoaded(Vec<FaultRecord>),
    FaultsFailed,
    ToggleGeneralSelection { key: StockKey, on: bool },
    ToggleSystemSelection { key: StockKey, on: bool },
    MoveSelectedToSystemRoom,
    RemoveSelectedFromSystemRoom,
    MoveRowToSystemRoom(StockKey),
    RemoveRowFromSystemRoom(StockKey),
    SystemRoomUpdated,
    SubmitAssignment(AssignmentRequest),
    AssignmentCompleted(String),
    ScrapConfirmed {
        key: StockKey,
        quantity: u32,
        actor: String,
    },
    MovementCompleted,
    MarkFaulty {
        key: StockKey,
        reason: String,
        destination: String,
    },
    Reactivate(StockKey),
    FaultUpdated { message: Option<String> },
    Failed(String),
    DismissBanner,
}

/// Side effects the engine runs against the directory.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchSnapshot,
    FetchFaults,
    SubmitMovement(StockMovement),
    SubmitAssignment(AssignmentRequest),
    MarkFault(FaultMark),
    CloseFault {
        entity_key: String,
        status: String,
        /// Scrap cleanup closes the fault opportunistically; failures
        /// (typically a missing record) are logged and swallowed.
        best_effort: bool,
    },
    SystemRoomAdd(Vec<StockKey>),
    SystemRoomRemove(Vec<StockKey>),
}

fn refresh_effects() -> Vec<Effect> {
    vec![Effect::FetchSnapshot, Effect::FetchFaults]
}

pub fn reduce(state: &mut BoardState, action: BoardAction) -> Vec<Effect> {
    match action {
        BoardAction::Refresh => {
            state.begin_loading();
            refresh_effects()
        }
        BoardAction::SnapshotLoaded(raws) => {
            let rows: Vec<StockRow> = raws.iter().map(StockRow::from_raw).collect();
            state.apply_snapshot(rows);
            Vec::new()
        }
        BoardAction::SnapshotFailed(message) => {
            state.mark_unavailable();
            state.banner = Some(Banner::danger(message));
            Vec::new()
        }
        BoardAction::FaultsLoaded(records) => {
            state.apply_overlay(FaultOverlay::loaded(records));
            Vec::new()
        }
        BoardAction::FaultsFailed => {
            // Quantities still render; fault columns degrade to unknown.
            state.apply_overlay(FaultOverlay::unavailable());
            Vec::new()
        }
        BoardAction::ToggleGeneralSelection { key, on } => {
            BoardState::toggle_selection(&mut state.general_selection, &key, on);
            Vec::new()
        }
        BoardAction::ToggleSystemSelection { key, on } => {
            BoardState::toggle_selection(&mut state.system_selection, &key, on);
            Vec::new()
        }
        BoardAction::MoveSelectedToSystemRoom => {
            let keys = BoardState::decode_selection(&state.general_selection);
            if keys.is_empty() {
                state.banner = Some(Banner::warning("Önce satır seçiniz."));
                return Vec::new();
            }
            vec![Effect::SystemRoomAdd(keys)]
        }
        BoardAction::RemoveSelectedFromSystemRoom => {
            let keys = BoardState::decode_selection(&state.system_selection);
            if keys.is_empty() {
                state.banner = Some(Banner::warning("Önce satır seçiniz."));
                return Vec::new();
            }
            vec![Effect::SystemRoomRemove(keys)]
        }
        BoardAction::MoveRowToSystemRoom(key) => vec![Effect::SystemRoomAdd(vec![key])],
        BoardAction::RemoveRowFromSystemRoom(key) => vec![Effect::SystemRoomRemove(vec![key])],
        BoardAction::SystemRoomUpdated => {
            state.general_selection.clear();
            state.system_selection.clear();
            state.banner = Some(Banner::success("Sistem odası güncellendi."));
            refresh_effects()
        }
        BoardAction::SubmitAssignment(request) => vec![Effect::SubmitAssignment(request)],
        BoardAction::AssignmentCompleted(message) => {
            state.banner = Some(Banner::success(message));
            refresh_effects()
        }
        BoardAction::ScrapConfirmed {
            key,
            quantity,
            actor,
        } => match StockMovement::scrap(&key, quantity, &actor) {
            Ok(movement) => {
                // Remember the open fault now; the row may be gone from the
                // next snapshot once the movement lands.
                state.pending_fault_close = state
                    .find_row(&key)
                    .filter(|row| row.fault.is_open())
                    .map(fault_key);
                vec![Effect::SubmitMovement(movement)]
            }
            Err(err) => {
                state.banner = Some(Banner::danger(err.user_message()));
                Vec::new()
            }
        },
        BoardAction::MovementCompleted => {
            state.banner = Some(Banner::success("İşlem tamamlandı."));
            match state.pending_fault_close.take() {
                Some(entity_key) => vec![Effect::CloseFault {
                    entity_key,
                    status: FAULT_STATUS_SCRAPPED.to_string(),
                    best_effort: true,
                }],
                None => refresh_effects(),
            }
        }
        BoardAction::MarkFaulty {
            key,
            reason,
            destination,
        } => {
            let Some(row) = state.find_row(&key) else {
                state.banner = Some(Banner::danger("Kayıt bulunamadı."));
                return Vec::new();
            };
            let mark = FaultMark {
                entity_key: fault_key(row),
                label: fault_label(row),
                reason,
                destination,
                meta: Some(fault_meta(&row.key)),
            };
            vec![Effect::MarkFault(mark)]
        }
        BoardAction::Reactivate(key) => {
            let Some(row) = state.find_row(&key) else {
                state.banner = Some(Banner::danger("Kayıt bulunamadı."));
                return Vec::new();
            };
            if !row.fault.is_open() {
                state.banner = Some(Banner::warning("Aktif arıza kaydı bulunamadı."));
                return Vec::new();
            }
            vec![Effect::CloseFault {
                entity_key: fault_key(row),
                status: FAULT_STATUS_REPAIRED.to_string(),
                best_effort: false,
            }]
        }
        BoardAction::FaultUpdated { message } => {
            if let Some(message) = message {
                state.banner = Some(Banner::success(message));
            }
            refresh_effects()
        }
        BoardAction::Failed(message) => {
            // A scrap whose movement was rejected must not leave its fault
            // key queued for a later, unrelated movement.
            state.pending_fault_close = None;
            state.banner = Some(Banner::danger(message));
            Vec::new()
        }
        BoardAction::DismissBanner => {
            state.banner = None;
            Vec::new()
        }
    }
}
