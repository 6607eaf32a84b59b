//! Two-pass aggregation of account rows into a report tree.
//!
//! Pass one walks the rows once and computes per-class and per-group
//! partition sums, plus the grand total. Classes are keyed by name and
//! groups by `(class, group)` name, since group names repeat across classes. Pass two collates
//! consecutive rows into class and group buckets and attaches the
//! precomputed sums instead of re-summing.
//!
//! Rows must arrive ordered by account number. Consecutive rows with the
//! same class name form one class bucket; within it, consecutive rows with
//! the same group name form one group bucket.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use super::types::{
    AccountLine, AccountSums, ClassSection, GroupSection, ItemAmount, ReportRow, ReportTree,
};

/// Sums item amounts per account, split into closed and open entries.
#[must_use]
pub fn sum_by_account(items: &[ItemAmount]) -> BTreeMap<i32, AccountSums> {
    let mut sums: BTreeMap<i32, AccountSums> = BTreeMap::new();
    for item in items {
        let entry = sums.entry(item.account).or_default();
        if item.closed {
            entry.closed += item.amount;
        } else {
            entry.open += item.amount;
        }
        entry.items += 1;
    }
    sums
}

/// `(class name, group name)`.
type GroupKey<'a> = (&'a str, &'a str);

/// Partition sums computed by the first pass.
struct PartitionSums<'a> {
    classes: HashMap<&'a str, Vec<Decimal>>,
    groups: HashMap<GroupKey<'a>, Vec<Decimal>>,
    group_rows: HashMap<GroupKey<'a>, usize>,
    total: Vec<Decimal>,
}

fn add_into(target: &mut [Decimal], values: &[Decimal]) {
    for (t, v) in target.iter_mut().zip(values) {
        *t += *v;
    }
}

fn partition_sums(rows: &[ReportRow], width: usize) -> PartitionSums<'_> {
    let mut sums = PartitionSums {
        classes: HashMap::new(),
        groups: HashMap::new(),
        group_rows: HashMap::new(),
        total: vec![Decimal::ZERO; width],
    };

    for row in rows {
        let shown = row.display_values();
        let group = (row.class_name.as_str(), row.group_name.as_str());
        add_into(
            sums.classes
                .entry(row.class_name.as_str())
                .or_insert_with(|| vec![Decimal::ZERO; width]),
            &shown,
        );
        add_into(
            sums.groups
                .entry(group)
                .or_insert_with(|| vec![Decimal::ZERO; width]),
            &shown,
        );
        *sums.group_rows.entry(group).or_default() += 1;
        add_into(&mut sums.total, &row.values);
    }

    sums
}

/// Collates ordered rows into a class -> group -> account tree.
///
/// Class and group totals are display-signed (negated for flipped rows);
/// the grand total is in ledger sign. `width` is the number of value columns.
#[must_use]
pub fn collate(rows: &[ReportRow], width: usize) -> ReportTree {
    let sums = partition_sums(rows, width);
    let zeros = vec![Decimal::ZERO; width];

    let mut classes: Vec<ClassSection> = Vec::new();
    for row in rows {
        let new_class = classes
            .last()
            .is_none_or(|c| c.name != row.class_name);
        if new_class {
            classes.push(ClassSection {
                name: row.class_name.clone(),
                groups: Vec::new(),
                totals: sums
                    .classes
                    .get(row.class_name.as_str())
                    .cloned()
                    .unwrap_or_else(|| zeros.clone()),
                flipped: row.flip,
            });
        }
        let Some(class) = classes.last_mut() else {
            continue;
        };

        let new_group = class.groups.last().is_none_or(|g| g.name != row.group_name);
        if new_group {
            let key = (row.class_name.as_str(), row.group_name.as_str());
            let rows_in_group = sums
                .group_rows
                .get(&key)
                .copied()
                .unwrap_or_default();
            class.groups.push(GroupSection {
                name: row.group_name.clone(),
                accounts: Vec::new(),
                folded: row.foldable && rows_in_group == 1,
                totals: sums
                    .groups
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| zeros.clone()),
            });
        }
        if let Some(group) = class.groups.last_mut() {
            group.accounts.push(AccountLine {
                num: row.num,
                name: row.name.clone(),
                values: row.display_values(),
            });
        }
    }

    ReportTree {
        classes,
        total: sums.total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn row(class: &str, group: &str, num: i32, flip: bool, values: Vec<Decimal>) -> ReportRow {
        ReportRow {
            class_name: class.to_string(),
            group_name: group.to_string(),
            foldable: true,
            flip,
            num,
            name: format!("Account {num}"),
            values,
        }
    }

    #[test]
    fn test_sum_by_account_splits_open_and_closed() {
        let d = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let items = vec![
            ItemAmount { account: 1000, date: d, amount: dec!(10), closed: true },
            ItemAmount { account: 1000, date: d, amount: dec!(-3), closed: false },
            ItemAmount { account: 2000, date: d, amount: dec!(7), closed: true },
        ];
        let sums = sum_by_account(&items);
        assert_eq!(sums[&1000].closed, dec!(10));
        assert_eq!(sums[&1000].open, dec!(-3));
        assert_eq!(sums[&1000].items, 2);
        assert_eq!(sums[&2000].closed, dec!(7));
    }

    #[test]
    fn test_collate_builds_hierarchy() {
        let rows = vec![
            row("Assets", "Cash", 1000, false, vec![dec!(100)]),
            row("Assets", "Cash", 1010, false, vec![dec!(50)]),
            row("Assets", "Receivables", 1500, false, vec![dec!(25)]),
            row("Liabilities", "Loans", 2000, true, vec![dec!(-175)]),
        ];
        let tree = collate(&rows, 1);

        assert_eq!(tree.classes.len(), 2);
        let assets = &tree.classes[0];
        assert_eq!(assets.totals, vec![dec!(175)]);
        assert_eq!(assets.groups.len(), 2);
        assert_eq!(assets.groups[0].totals, vec![dec!(150)]);
        assert!(!assets.groups[0].folded);
        assert!(assets.groups[1].folded);

        let liabilities = &tree.classes[1];
        assert_eq!(liabilities.totals, vec![dec!(175)]);
        assert_eq!(liabilities.groups[0].accounts[0].values, vec![dec!(175)]);
        assert_eq!(liabilities.ledger_totals(), vec![dec!(-175)]);

        assert_eq!(tree.total, vec![Decimal::ZERO]);
    }

    #[test]
    fn test_same_group_name_in_two_classes_kept_apart() {
        let rows = vec![
            row("Assets", "Other", 1000, false, vec![dec!(100)]),
            row("Liabilities", "Other", 2000, true, vec![dec!(-100)]),
        ];
        let tree = collate(&rows, 1);

        let assets = &tree.classes[0];
        assert_eq!(assets.groups[0].totals, vec![dec!(100)]);
        assert_eq!(assets.totals, vec![dec!(100)]);
        assert!(assets.groups[0].folded);

        let liabilities = &tree.classes[1];
        assert_eq!(liabilities.groups[0].totals, vec![dec!(100)]);
        assert!(liabilities.groups[0].folded);
    }

    #[test]
    fn test_group_not_folded_unless_foldable() {
        let mut single = row("Assets", "Bank", 1930, false, vec![dec!(1)]);
        single.foldable = false;
        let tree = collate(&[single], 1);
        assert!(!tree.classes[0].groups[0].folded);
    }

    #[test]
    fn test_collate_empty() {
        let tree = collate(&[], 3);
        assert!(tree.is_empty());
        assert_eq!(tree.total, vec![Decimal::ZERO; 3]);
    }
}
