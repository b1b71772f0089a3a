//! Output formatting for CLI display.

use uuid::Uuid;

use crate::model::{Item, LogEntry, Mover};

/// First eight characters of an id, enough to tell records apart.
pub(super) fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

pub(super) fn format_mover(mover: &Mover) -> String {
    let items = match mover.carried_items.len() {
        0 => "empty".to_string(),
        1 => "1 item".to_string(),
        n => format!("{n} items"),
    };
    format!(
        "{}  [{}]  {}  limit {}  missions {}  {items}",
        short_id(&mover.id),
        mover.state,
        mover.name,
        mover.weight_limit,
        mover.completed_missions,
    )
}

pub(super) fn format_item(item: &Item) -> String {
    format!("{}  {}  weight {}", item.id, item.name, item.weight)
}

pub(super) fn format_entry(entry: &LogEntry) -> String {
    let items = entry
        .item_ids
        .iter()
        .map(short_id)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{}  {}  {}  [{items}]",
        entry.timestamp,
        short_id(&entry.mover_id),
        entry.action,
    )
}

pub(super) fn format_cleared(n: usize, singular: &str, plural: &str) -> String {
    let noun = if n == 1 { singular } else { plural };
    format!("{n} {noun} cleared")
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;

    use crate::model::{Action, QuestState, Weight};

    fn fixed_id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn format_resting_mover() {
        let mut mover = Mover::new("Bill", Weight::try_from(10.0).unwrap());
        mover.id = fixed_id(0xa3b0_fc12_0000_0000_0000_0000_0000_0000);
        mover.completed_missions = 2;

        assert_eq!(
            format_mover(&mover),
            "a3b0fc12  [resting]  Bill  limit 10  missions 2  empty"
        );
    }

    #[test]
    fn format_loaded_mover_counts_items() {
        let mut mover = Mover::new("Bill", Weight::try_from(7.5).unwrap());
        mover.id = fixed_id(0xa3b0_fc12_0000_0000_0000_0000_0000_0000);
        mover.state = QuestState::OnMission;
        mover.carried_items = vec![fixed_id(1), fixed_id(2)];

        assert_eq!(
            format_mover(&mover),
            "a3b0fc12  [on-mission]  Bill  limit 7.5  missions 0  2 items"
        );
    }

    #[test]
    fn format_log_entry() {
        let entry = LogEntry {
            id: fixed_id(9),
            mover_id: fixed_id(0x1234_5678_0000_0000_0000_0000_0000_0000),
            item_ids: vec![fixed_id(0xdead_beef_0000_0000_0000_0000_0000_0000)],
            action: Action::StartingMission,
            timestamp: Timestamp::new(1_000_000_000, 0).unwrap(),
        };

        assert_eq!(
            format_entry(&entry),
            "2001-09-09T01:46:40Z  12345678  starting mission  [deadbeef]"
        );
    }

    #[test]
    fn format_cleared_counts() {
        assert_eq!(format_cleared(0, "mover", "movers"), "0 movers cleared");
        assert_eq!(format_cleared(1, "item", "items"), "1 item cleared");
        assert_eq!(
            format_cleared(3, "log entry", "log entries"),
            "3 log entries cleared"
        );
    }
}
