//! Entry ledger: logged distances in insertion order.
//!
//! Only the most recently appended entry is ever edited or removed through
//! `edit_last`/`delete_last`; that is what "last" means here, regardless of
//! the dates on the entries. The date-sorted listing is a separate read-only
//! view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::ValidationError;

/// One logged distance on a calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: String,
    pub distance: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub edited: bool,
}

impl Entry {
    pub fn new(distance: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            distance,
            date,
            edited: false,
        }
    }
}

/// Ledger totals before and after a mutation, for milestone crossing checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalsChange {
    pub before: f64,
    pub after: f64,
}

/// Parse user distance input. Rejects non-numeric, non-finite and <= 0.
pub fn parse_distance(raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::NonNumeric(raw.to_string()))?;
    check_distance(value)
}

fn check_distance(value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonNumeric(value.to_string()));
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive(value));
    }
    Ok(value)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<Entry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.distance).sum()
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Entries in the order they were logged.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Newest date first; same-day entries keep most-recently-logged first.
    pub fn by_date_desc(&self) -> Vec<&Entry> {
        let mut view: Vec<&Entry> = self.entries.iter().rev().collect();
        view.sort_by(|a, b| b.date.cmp(&a.date));
        view
    }

    pub fn append(&mut self, distance: f64, date: NaiveDate) -> Result<TotalsChange, ValidationError> {
        let distance = check_distance(distance)?;
        let before = self.total();
        let entry = Entry::new(distance, date);
        debug!(id = %entry.id, distance, %date, "append entry");
        self.entries.push(entry);
        Ok(TotalsChange {
            before,
            after: self.total(),
        })
    }

    pub fn edit_last(&mut self, new_distance: f64) -> Result<TotalsChange, ValidationError> {
        let new_distance = check_distance(new_distance)?;
        let before = self.total();
        let last = self
            .entries
            .last_mut()
            .ok_or(ValidationError::EmptyLedger)?;
        debug!(id = %last.id, from = last.distance, to = new_distance, "edit last entry");
        last.distance = new_distance;
        last.edited = true;
        Ok(TotalsChange {
            before,
            after: self.total(),
        })
    }

    /// Remove the most recent entry; no-op on an empty ledger.
    pub fn delete_last(&mut self) -> Option<Entry> {
        let removed = self.entries.pop();
        if let Some(ref e) = removed {
            debug!(id = %e.id, "delete last entry");
        }
        removed
    }

    /// Remove the entry with `id`; no-op if absent.
    pub fn delete_by_id(&mut self, id: &str) -> Option<Entry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        debug!(id, "delete entry");
        Some(self.entries.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, n).unwrap()
    }

    #[test]
    fn test_append_reports_totals() {
        let mut l = Ledger::new();
        let c = l.append(10.0, day(1)).unwrap();
        assert_eq!(c, TotalsChange { before: 0.0, after: 10.0 });
        let c = l.append(2.5, day(2)).unwrap();
        assert_eq!(c, TotalsChange { before: 10.0, after: 12.5 });
        assert_eq!(l.len(), 2);
        assert!(!l.entries()[0].edited);
        assert_ne!(l.entries()[0].id, l.entries()[1].id);
    }

    #[test]
    fn test_append_rejects_bad_distance() {
        let mut l = Ledger::new();
        assert_eq!(l.append(0.0, day(1)), Err(ValidationError::NonPositive(0.0)));
        assert_eq!(l.append(-3.0, day(1)), Err(ValidationError::NonPositive(-3.0)));
        assert!(l.append(f64::NAN, day(1)).is_err());
        assert!(l.append(f64::INFINITY, day(1)).is_err());
        assert!(l.is_empty());
    }

    #[test]
    fn test_edit_last() {
        let mut l = Ledger::new();
        assert_eq!(l.edit_last(5.0), Err(ValidationError::EmptyLedger));

        l.append(10.0, day(1)).unwrap();
        let c = l.edit_last(15.0).unwrap();
        assert_eq!(c, TotalsChange { before: 10.0, after: 15.0 });
        assert_eq!(l.len(), 1);
        assert!(l.entries()[0].edited);

        assert!(l.edit_last(-1.0).is_err());
        assert_eq!(l.total(), 15.0);
    }

    #[test]
    fn test_edit_last_only_touches_newest() {
        let mut l = Ledger::new();
        l.append(3.0, day(5)).unwrap();
        // logged later but dated earlier; still "last"
        l.append(4.0, day(1)).unwrap();
        l.edit_last(6.0).unwrap();
        assert_eq!(l.entries()[0].distance, 3.0);
        assert!(!l.entries()[0].edited);
        assert_eq!(l.entries()[1].distance, 6.0);
    }

    #[test]
    fn test_delete_last_is_idempotent_when_empty() {
        let mut l = Ledger::new();
        assert!(l.delete_last().is_none());
        assert!(l.delete_last().is_none());
        assert!(l.is_empty());

        l.append(1.0, day(1)).unwrap();
        l.append(2.0, day(2)).unwrap();
        assert_eq!(l.delete_last().unwrap().distance, 2.0);
        assert_eq!(l.total(), 1.0);
    }

    #[test]
    fn test_delete_by_id() {
        let mut l = Ledger::new();
        l.append(1.0, day(1)).unwrap();
        l.append(2.0, day(2)).unwrap();
        let id = l.entries()[0].id.clone();
        assert!(l.delete_by_id("nope").is_none());
        assert_eq!(l.delete_by_id(&id).unwrap().distance, 1.0);
        assert!(l.delete_by_id(&id).is_none());
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn test_by_date_desc_view() {
        let mut l = Ledger::new();
        l.append(1.0, day(2)).unwrap();
        l.append(2.0, day(9)).unwrap();
        l.append(3.0, day(2)).unwrap();
        let view: Vec<f64> = l.by_date_desc().iter().map(|e| e.distance).collect();
        assert_eq!(view, vec![2.0, 3.0, 1.0]);
        // insertion order is untouched
        assert_eq!(l.last().unwrap().distance, 3.0);
    }

    #[test]
    fn test_parse_distance() {
        assert_eq!(parse_distance(" 4.2 "), Ok(4.2));
        assert_eq!(parse_distance("abc"), Err(ValidationError::NonNumeric("abc".into())));
        assert_eq!(parse_distance("0"), Err(ValidationError::NonPositive(0.0)));
        assert!(parse_distance("NaN").is_err());
        assert!(parse_distance("").is_err());
    }
}
