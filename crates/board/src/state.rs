//! Board state: the four tables, selections, and per-row actions.
//!
//! All of this is owned data. The board is rebuilt from the latest snapshot
//! and fault overlay on every change; nothing is patched in place and there
//! is no shared mutable cache behind it.

use std::collections::BTreeSet;

use stocktrack_stock::{fault_key, FaultOverlay, FaultState, ItemKind, StockKey, StockRow};

/// Lifecycle of one rendered table.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TableState {
    #[default]
    Loading,
    Ready(Vec<StockRow>),
    /// The snapshot fetch failed; the table renders a placeholder instead
    /// of stale rows.
    Unavailable,
}

impl TableState {
    pub fn rows(&self) -> &[StockRow] {
        match self {
            TableState::Ready(rows) => rows,
            _ => &[],
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, TableState::Ready(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

/// Transient message strip above the tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub message: String,
    pub severity: Severity,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Danger,
        }
    }
}

/// Entries of a row's action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Assign,
    MarkFaulty,
    Reactivate,
    Scrap,
    MoveToSystemRoom,
    RemoveFromSystemRoom,
}

/// Action menu for one row, in render order. Assign only appears with
/// stock on hand; the fault entry flips between mark and reactivate, with
/// [`FaultState::Unknown`] treated as not-faulty.
pub fn actions_for(row: &StockRow) -> Vec<RowAction> {
    let mut actions = Vec::new();
    if row.net_quantity > 0 {
        actions.push(RowAction::Assign);
    }
    if row.fault.is_open() {
        actions.push(RowAction::Reactivate);
    } else {
        actions.push(RowAction::MarkFaulty);
    }
    actions.push(RowAction::Scrap);
    if row.system_room {
        actions.push(RowAction::RemoveFromSystemRoom);
    } else {
        actions.push(RowAction::MoveToSystemRoom);
    }
    actions
}

/// The whole status board.
#[derive(Debug, Default)]
pub struct BoardState {
    pub inventory: TableState,
    pub printers: TableState,
    pub licenses: TableState,
    pub system_room: TableState,
    pub banner: Option<Banner>,
    /// Checked rows in the three general tables, as encoded stock keys.
    pub general_selection: BTreeSet<String>,
    /// Checked rows in the system room table.
    pub system_selection: BTreeSet<String>,
    /// Last snapshot, pre-overlay; tables are derived from it.
    pub(crate) snapshot: Option<Vec<StockRow>>,
    pub(crate) overlay: FaultOverlay,
    /// Fault entity key to close after a scrap movement lands.
    pub(crate) pending_fault_close: Option<String>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn begin_loading(&mut self) {
        self.inventory = TableState::Loading;
        self.printers = TableState::Loading;
        self.licenses = TableState::Loading;
        self.system_room = TableState::Loading;
    }

    pub(crate) fn mark_unavailable(&mut self) {
        self.snapshot = None;
        self.inventory = TableState::Unavailable;
        self.printers = TableState::Unavailable;
        self.licenses = TableState::Unavailable;
        self.system_room = TableState::Unavailable;
    }

    pub(crate) fn apply_snapshot(&mut self, rows: Vec<StockRow>) {
        self.snapshot = Some(rows);
        self.general_selection.clear();
        self.system_selection.clear();
        self.rebuild();
    }

    pub(crate) fn apply_overlay(&mut self, overlay: FaultOverlay) {
        self.overlay = overlay;
        self.rebuild();
    }

    /// Re-derive the four tables from the snapshot and the fault overlay.
    /// System-room membership wins over category, so each row lands in
    /// exactly one table.
    fn rebuild(&mut self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let mut inventory = Vec::new();
        let mut printers = Vec::new();
        let mut licenses = Vec::new();
        let mut system_room = Vec::new();
        for base in snapshot {
            let mut row = base.clone();
            row.fault = self.overlay.state_for(&fault_key(&row));
            if row.system_room {
                system_room.push(row);
            } else {
                match row.key.kind() {
                    ItemKind::Inventory => inventory.push(row),
                    ItemKind::Printer => printers.push(row),
                    ItemKind::License => licenses.push(row),
                }
            }
        }
        self.inventory = TableState::Ready(inventory);
        self.printers = TableState::Ready(printers);
        self.licenses = TableState::Ready(licenses);
        self.system_room = TableState::Ready(system_room);
    }

    /// Find the current rendered row for a key, in whichever table it
    /// landed.
    pub fn find_row(&self, key: &StockKey) -> Option<&StockRow> {
        [
            &self.inventory,
            &self.printers,
            &self.licenses,
            &self.system_room,
        ]
        .into_iter()
        .flat_map(|table| table.rows())
        .find(|row| &row.key == key)
    }

    /// Derived fault state for a key, [`FaultState::Unknown`] when the row
    /// is gone.
    pub fn fault_state(&self, key: &StockKey) -> FaultState {
        self.find_row(key)
            .map(|row| row.fault.clone())
            .unwrap_or_default()
    }

    pub(crate) fn toggle_selection(selection: &mut BTreeSet<String>, key: &StockKey, on: bool) {
        if on {
            selection.insert(key.encoded());
        } else {
            selection.remove(&key.encoded());
        }
    }

    pub(crate) fn decode_selection(selection: &BTreeSet<String>) -> Vec<StockKey> {
        selection
            .iter()
            .filter_map(|encoded| StockKey::decode(encoded))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocktrack_stock::{FaultRecord, RawStockRow};

    fn raw(hw: &str, kind: &str, qty: i64, system_room: bool) -> RawStockRow {
        RawStockRow {
            donanim_tipi: Some(hw.into()),
            item_type: Some(kind.into()),
            net_miktar: Some(qty),
            system_room,
            ..Default::default()
        }
    }

    fn rows(raws: &[RawStockRow]) -> Vec<StockRow> {
        raws.iter().map(StockRow::from_raw).collect()
    }

    #[test]
    fn partition_is_total_and_exclusive() {
        let snapshot = rows(&[
            raw("Laptop", "envanter", 5, false),
            raw("Printer-A", "yazici", 1, false),
            raw("Office 365", "lisans", 2, false),
            raw("Switch", "envanter", 1, true),
            raw("Office 2021", "lisans", 1, true),
        ]);
        let mut state = BoardState::new();
        state.apply_snapshot(snapshot.clone());

        let total = state.inventory.rows().len()
            + state.printers.rows().len()
            + state.licenses.rows().len()
            + state.system_room.rows().len();
        assert_eq!(total, snapshot.len());
        // System-room membership wins over category.
        assert_eq!(state.system_room.rows().len(), 2);
        assert_eq!(state.inventory.rows().len(), 1);
        assert_eq!(state.licenses.rows().len(), 1);
        assert_eq!(state.printers.rows().len(), 1);
    }

    #[test]
    fn overlay_merge_flips_fault_state() {
        let snapshot = rows(&[raw("Laptop", "envanter", 5, false)]);
        let mut state = BoardState::new();
        state.apply_snapshot(snapshot);
        // Overlay not loaded yet: state degrades to Unknown.
        assert_eq!(state.inventory.rows()[0].fault, FaultState::Unknown);

        state.apply_overlay(FaultOverlay::loaded(vec![FaultRecord {
            entity_key: Some("laptop".into()),
            status: Some("arızalı".into()),
            ..Default::default()
        }]));
        assert!(state.inventory.rows()[0].fault.is_open());

        state.apply_overlay(FaultOverlay::loaded(Vec::new()));
        assert_eq!(state.inventory.rows()[0].fault, FaultState::Clear);
    }

    #[test]
    fn action_menu_tracks_quantity_fault_and_room() {
        let in_stock = StockRow::from_raw(&raw("Laptop", "envanter", 3, false));
        assert_eq!(
            actions_for(&in_stock),
            vec![
                RowAction::Assign,
                RowAction::MarkFaulty,
                RowAction::Scrap,
                RowAction::MoveToSystemRoom,
            ]
        );

        let mut depleted = StockRow::from_raw(&raw("Laptop", "envanter", 0, true));
        depleted.fault = FaultState::Open(FaultRecord::default());
        assert_eq!(
            actions_for(&depleted),
            vec![
                RowAction::Reactivate,
                RowAction::Scrap,
                RowAction::RemoveFromSystemRoom,
            ]
        );
    }

    #[test]
    fn unknown_fault_state_offers_mark_faulty() {
        let row = StockRow::from_raw(&raw("Laptop", "envanter", 3, false));
        assert_eq!(row.fault, FaultState::Unknown);
        assert!(actions_for(&row).contains(&RowAction::MarkFaulty));
    }

    #[test]
    fn snapshot_replaces_selections() {
        let mut state = BoardState::new();
        state.apply_snapshot(rows(&[raw("Laptop", "envanter", 5, false)]));
        let key = state.inventory.rows()[0].key.clone();
        BoardState::toggle_selection(&mut state.general_selection, &key, true);
        assert_eq!(state.general_selection.len(), 1);

        state.apply_snapshot(rows(&[raw("Laptop", "envanter", 4, false)]));
        assert!(state.general_selection.is_empty());
    }

    #[test]
    fn selection_decode_round_trips() {
        let mut selection = BTreeSet::new();
        let key = StockKey::normalize(None, None, Some("Laptop"), Some("Dell"), None, None);
        BoardState::toggle_selection(&mut selection, &key, true);
        assert_eq!(BoardState::decode_selection(&selection), vec![key.clone()]);
        BoardState::toggle_selection(&mut selection, &key, false);
        assert!(selection.is_empty());
    }
}
