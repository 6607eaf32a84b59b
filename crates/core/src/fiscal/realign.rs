//! Fiscal-year realignment planning.
//!
//! After the first day of the fiscal year is changed, existing journal
//! entries may be stored under a year that no longer contains their date.
//! [`RealignPlan`] lists those entries and computes where they move; the
//! database layer applies it in one transaction.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tallybook_shared::types::JournalEntryId;

use super::calendar::FiscalCalendar;

/// Where a journal entry is currently stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPlacement {
    /// Entry ID.
    pub id: JournalEntryId,
    /// Fiscal year the entry is stored under.
    pub year: i32,
    /// Sequence number within that year.
    pub seq: i32,
    /// Transaction date.
    pub date: NaiveDate,
}

/// An entry that belongs to a different fiscal year than the one it is stored in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMove {
    /// Entry ID.
    pub id: JournalEntryId,
    /// Year the entry is stored under now.
    pub from_year: i32,
    /// Year the entry's date belongs to.
    pub to_year: i32,
    /// Current sequence number.
    pub seq: i32,
    /// Transaction date.
    pub date: NaiveDate,
}

/// New placement of a moved entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceAssignment {
    /// Entry ID.
    pub id: JournalEntryId,
    /// Target year.
    pub year: i32,
    /// Sequence number in the target year.
    pub seq: i32,
}

/// The set of entries to move between fiscal years.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RealignPlan {
    /// Mismatched entries ordered by (current year, date, seq).
    pub moves: Vec<EntryMove>,
}

impl RealignPlan {
    /// Finds every entry whose stored year differs from the fiscal year of its date.
    #[must_use]
    pub fn build(calendar: &FiscalCalendar, entries: &[EntryPlacement]) -> Self {
        let mut moves: Vec<EntryMove> = entries
            .iter()
            .filter_map(|entry| {
                let to_year = calendar.fiscal_year_of(entry.date);
                (to_year != entry.year).then_some(EntryMove {
                    id: entry.id,
                    from_year: entry.year,
                    to_year,
                    seq: entry.seq,
                    date: entry.date,
                })
            })
            .collect();
        moves.sort_by_key(|m| (m.from_year, m.date, m.seq));
        Self { moves }
    }

    /// Returns true when every entry is already in its correct year.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Groups the moves by `(from_year, to_year)`.
    #[must_use]
    pub fn by_direction(&self) -> BTreeMap<(i32, i32), Vec<&EntryMove>> {
        let mut grouped: BTreeMap<(i32, i32), Vec<&EntryMove>> = BTreeMap::new();
        for m in &self.moves {
            grouped.entry((m.from_year, m.to_year)).or_default().push(m);
        }
        grouped
    }

    /// Years entries are moved out of.
    #[must_use]
    pub fn source_years(&self) -> BTreeSet<i32> {
        self.moves.iter().map(|m| m.from_year).collect()
    }

    /// Years entries are moved into.
    #[must_use]
    pub fn target_years(&self) -> BTreeSet<i32> {
        self.moves.iter().map(|m| m.to_year).collect()
    }

    /// Source and target years together.
    #[must_use]
    pub fn affected_years(&self) -> BTreeSet<i32> {
        self.source_years()
            .union(&self.target_years())
            .copied()
            .collect()
    }

    /// Source years left without entries or incoming balances after the move.
    ///
    /// `entry_count` and `balance_count` report the current number of
    /// entries and incoming-balance rows stored under a year.
    #[must_use]
    pub fn emptied_years<E, B>(&self, entry_count: E, balance_count: B) -> Vec<i32>
    where
        E: Fn(i32) -> u64,
        B: Fn(i32) -> u64,
    {
        self.source_years()
            .into_iter()
            .filter(|&year| {
                let leaving = self.moves.iter().filter(|m| m.from_year == year).count() as u64;
                let arriving = self.moves.iter().any(|m| m.to_year == year);
                !arriving
                    && entry_count(year).saturating_sub(leaving) == 0
                    && balance_count(year) == 0
            })
            .collect()
    }

    /// Assigns sequence numbers in each target year, continuing after that
    /// year's current maximum. Entries are numbered in `(date, seq)` order.
    #[must_use]
    pub fn sequence_assignments<M>(&self, max_seq: M) -> Vec<SequenceAssignment>
    where
        M: Fn(i32) -> i32,
    {
        let mut by_target: BTreeMap<i32, Vec<&EntryMove>> = BTreeMap::new();
        for m in &self.moves {
            by_target.entry(m.to_year).or_default().push(m);
        }

        let mut assignments = Vec::with_capacity(self.moves.len());
        for (year, mut moves) in by_target {
            moves.sort_by_key(|m| (m.date, m.seq));
            let mut seq = max_seq(year);
            for m in moves {
                seq += 1;
                assignments.push(SequenceAssignment {
                    id: m.id,
                    year,
                    seq,
                });
            }
        }
        assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn placement(year: i32, seq: i32, d: NaiveDate) -> EntryPlacement {
        EntryPlacement {
            id: JournalEntryId::new(),
            year,
            seq,
            date: d,
        }
    }

    fn uk() -> FiscalCalendar {
        FiscalCalendar::from_setting("04-06").unwrap()
    }

    #[test]
    fn test_calendar_aligned_entries_need_no_move() {
        let entries = vec![
            placement(2024, 1, date(2024, 1, 10)),
            placement(2024, 2, date(2024, 12, 31)),
        ];
        let plan = RealignPlan::build(&FiscalCalendar::calendar_year(), &entries);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_switch_to_split_year_moves_early_entries_back() {
        let entries = vec![
            placement(2024, 1, date(2024, 1, 10)),
            placement(2024, 2, date(2024, 4, 5)),
            placement(2024, 3, date(2024, 4, 6)),
            placement(2024, 4, date(2024, 11, 1)),
        ];
        let plan = RealignPlan::build(&uk(), &entries);

        assert_eq!(plan.moves.len(), 2);
        assert!(plan.moves.iter().all(|m| m.from_year == 2024 && m.to_year == 2023));
        assert_eq!(plan.by_direction()[&(2024, 2023)].len(), 2);
        assert_eq!(plan.source_years(), BTreeSet::from([2024]));
        assert_eq!(plan.affected_years(), BTreeSet::from([2023, 2024]));
    }

    #[test]
    fn test_sequence_assignments_continue_after_target_max() {
        let late = placement(2024, 1, date(2024, 3, 1));
        let early = placement(2024, 7, date(2024, 2, 1));
        let plan = RealignPlan::build(&uk(), &[late.clone(), early.clone()]);

        let assignments = plan.sequence_assignments(|year| if year == 2023 { 40 } else { 0 });
        assert_eq!(
            assignments,
            vec![
                SequenceAssignment { id: early.id, year: 2023, seq: 41 },
                SequenceAssignment { id: late.id, year: 2023, seq: 42 },
            ]
        );
    }

    #[test]
    fn test_emptied_years() {
        let entries = vec![
            placement(2024, 1, date(2024, 1, 10)),
            placement(2025, 1, date(2025, 2, 1)),
        ];
        let plan = RealignPlan::build(&uk(), &entries);
        assert_eq!(plan.target_years(), BTreeSet::from([2023, 2024]));

        // 2024 receives an entry, so it is never emptied; 2025 only had one.
        let emptied = plan.emptied_years(|_| 1, |_| 0);
        assert_eq!(emptied, vec![2025]);

        // Incoming balances keep a year alive.
        let emptied = plan.emptied_years(|_| 1, |year| u64::from(year == 2025));
        assert!(emptied.is_empty());
    }
}
