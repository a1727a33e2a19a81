use chrono::{Duration, NaiveDate};
use waypoint_core::{
    milestone_notice, planned_through, GoalConfig, Ledger, MilestoneDef, MilestoneTable,
    PlanConfig, RampStage, TrackerState,
};

fn d0() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
}

fn three_stop_table() -> MilestoneTable {
    MilestoneTable::new(vec![
        MilestoneDef::new("shire", "Shire", 0.0, "Home.", "Tea"),
        MilestoneDef::new("bree", "Bree", 120.0, "The inn.", "Ale"),
        MilestoneDef::new("rivendell", "Rivendell", 570.0, "Elves.", "Rest"),
    ])
    .unwrap()
}

fn one_week_plan(active_days_per_week: u8) -> PlanConfig {
    PlanConfig {
        enabled: true,
        start_date: d0(),
        cap_rate: 5.0,
        active_days_per_week,
        stages: vec![RampStage::new(1, 2.0)],
    }
}

/// Logging past Bree unlocks exactly Bree and points at Rivendell.
#[test]
fn test_append_crosses_bree() {
    let table = three_stop_table();
    let mut ledger = Ledger::new();
    ledger.append(100.0, d0()).unwrap();

    let change = ledger.append(30.0, d0() + Duration::days(1)).unwrap();
    assert_eq!((change.before, change.after), (100.0, 130.0));

    let crossed: Vec<_> = table
        .crossed(change.before, change.after)
        .iter()
        .map(|m| m.name.clone())
        .collect();
    assert_eq!(crossed, vec!["Bree"]);
    assert_eq!(table.current(130.0).name, "Bree");
    assert_eq!(table.next(130.0).unwrap().name, "Rivendell");
    assert_eq!(table.distance_to_next(130.0), Some(440.0));
    assert_eq!(
        milestone_notice(&table, change).as_deref(),
        Some("Milestone unlocked: Bree. Reward: Ale")
    );
}

#[test]
fn test_one_stage_then_cap() {
    let plan = one_week_plan(7);
    assert_eq!(planned_through(&plan, d0() + Duration::days(6)), 14.0);
    assert_eq!(planned_through(&plan, d0() + Duration::days(13)), 49.0);
    assert_eq!(planned_through(&plan, d0() - Duration::days(1)), 0.0);
}

#[test]
fn test_five_day_weeks() {
    let plan = one_week_plan(5);
    assert_eq!(planned_through(&plan, d0() + Duration::days(6)), 10.0);
}

#[test]
fn test_edit_last_marks_entry() {
    let mut ledger = Ledger::new();
    ledger.append(10.0, d0()).unwrap();
    let change = ledger.edit_last(15.0).unwrap();
    assert_eq!((change.before, change.after), (10.0, 15.0));
    assert_eq!(ledger.len(), 1);
    assert!(ledger.last().unwrap().edited);
}

#[test]
fn test_delete_last_on_empty_twice() {
    let mut ledger = Ledger::new();
    assert!(ledger.delete_last().is_none());
    assert!(ledger.delete_last().is_none());
    assert_eq!(ledger.total(), 0.0);
}

/// A full session: log, edit, delete, persist, reload, report.
#[test]
fn test_state_session_round_trip() {
    let table = MilestoneTable::shire_to_mordor();
    let mut state = TrackerState::fresh(d0(), &table);
    state.goal = GoalConfig::new(200.0, d0() + Duration::days(99));
    state.plan = one_week_plan(7);

    for i in 0..4 {
        state.entries.append(30.0, d0() + Duration::days(i)).unwrap();
    }
    let change = state.entries.edit_last(45.0).unwrap();
    assert_eq!(
        milestone_notice(&table, change).as_deref(),
        Some("Milestone unlocked: Bree. Reward: A pint at the inn")
    );
    state.entries.append(1.0, d0() + Duration::days(5)).unwrap();
    state.entries.delete_last();

    let json = state.to_json().unwrap();
    let reloaded = TrackerState::load_or_fresh(Some(&json), d0(), &table);
    assert_eq!(reloaded, state);

    let report = reloaded.report(&table, d0() + Duration::days(4));
    assert_eq!(report.total_distance, 135.0);
    assert_eq!(report.days_left, 95);
    let plan = report.plan.unwrap();
    // five days at 2.0
    assert_eq!(plan.planned_to_date, 10.0);
    assert_eq!(plan.pace_delta, 125.0);
    assert_eq!(report.current_milestone.name, "Bree");
}
