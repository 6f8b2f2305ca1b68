use calotrack_core::energy::{bmr, tdee};
use calotrack_core::{
    append, classify_week, compute_daily_target, compute_weekly_target, daily_total,
    derive_custom_food, remove_at, resolve, resolve_manual, week_of, weekly_total, ActivityLevel,
    DayKey, FoodCatalog, FoodCatalogEntry, Gender, Goal, LogEntry, LogsByDate, MeasureMode,
    MemoryKvStore, ProfileForm, TrackerService, UserProfile, WeekStatus,
};

fn day(value: &str) -> DayKey {
    DayKey::parse(value).unwrap()
}

fn profile(activity: ActivityLevel, goal: Goal) -> UserProfile {
    UserProfile::new(70.0, 175.0, 25.0, Gender::Male, activity, goal).unwrap()
}

#[test]
fn reference_profile_targets_2602_kcal() {
    let profile = profile(ActivityLevel::Moderate, Goal::Maintain);
    assert!((bmr(&profile) - 1678.75).abs() < 1e-9);
    assert!((tdee(&profile) - 2602.0625).abs() < 1e-9);
    assert_eq!(compute_daily_target(Some(&profile)), 2602);
    assert_eq!(compute_weekly_target(Some(&profile)), 2602 * 7);
}

#[test]
fn target_grows_with_activity_and_lose_is_500_below_maintain() {
    let targets = ActivityLevel::ALL
        .into_iter()
        .map(|level| compute_daily_target(Some(&profile(level, Goal::Maintain))))
        .collect::<Vec<_>>();
    assert!(targets.windows(2).all(|pair| pair[0] < pair[1]));

    for level in ActivityLevel::ALL {
        let maintain = compute_daily_target(Some(&profile(level, Goal::Maintain)));
        let lose = compute_daily_target(Some(&profile(level, Goal::Lose)));
        assert_eq!(maintain - lose, 500);
    }
}

#[test]
fn two_apple_portions_log_190_kcal() {
    let apple = FoodCatalogEntry::seed("Manzana", "unidad", 95.0, 1.0);
    let entry = resolve(&apple, MeasureMode::Portions, 2.0).unwrap();
    assert_eq!(entry.amount, 2.0);
    assert_eq!(entry.unit, "unidad");
    assert_eq!(entry.calories, 190);
}

#[test]
fn exact_calories_are_linear_within_rounding() {
    let rice = FoodCatalogEntry::seed("Arroz Blanco (Cocido)", "g", 1.3, 150.0);
    for (x, y) in [(33.0, 47.0), (1.0, 1.0), (120.5, 79.5)] {
        let cx = resolve(&rice, MeasureMode::Exact, x).unwrap().calories as i64;
        let cy = resolve(&rice, MeasureMode::Exact, y).unwrap().calories as i64;
        let cxy = resolve(&rice, MeasureMode::Exact, x + y).unwrap().calories as i64;
        assert_eq!(cxy, (1.3 * (x + y)).round() as i64);
        assert!((cxy - (cx + cy)).abs() <= 1);
    }
}

#[test]
fn manual_450_kcal_saved_as_custom_food() {
    let entry = resolve_manual("Arepa rellena", 450, Some(1.0), None).unwrap();
    assert_eq!(entry.calories, 450);

    let food = derive_custom_food(&entry.name, 450, entry.amount, Some(&entry.unit)).unwrap();
    assert_eq!(food.cal_per_unit, 450.0);
    assert_eq!(food.std_portion, Some(1.0));
    assert!(food.is_custom);

    let catalog = FoodCatalog::with_seed();
    let grown = catalog.add_custom(food.clone()).unwrap();
    assert_eq!(grown.len(), catalog.len() + 1);
    assert_eq!(grown.custom_entries(), vec![food]);
}

#[test]
fn week_totals_sum_days_and_lose_goal_succeeds() {
    let week = week_of(day("2024-04-29"));
    let mut logs = LogsByDate::new();
    for (date, kcal) in week.iter().zip([2000, 0, 2200, 1900, 2100, 0, 0]) {
        if kcal > 0 {
            logs = append(&logs, *date, LogEntry::new("Comida", 1.0, "porción", kcal));
        }
    }

    let total = weekly_total(&logs, &week);
    let summed = week
        .iter()
        .map(|date| daily_total(logs.day(*date)))
        .sum::<i64>();
    assert_eq!(total, 8200);
    assert_eq!(total, summed);
    assert_eq!(classify_week(total, 14_000, Goal::Lose), WeekStatus::Success);
    assert_eq!(classify_week(total, 14_000, Goal::Gain), WeekStatus::Fail);
    assert_eq!(classify_week(0, 14_000, Goal::Lose), WeekStatus::NoData);
}

#[test]
fn append_then_remove_first_restores_empty_day() {
    let date = day("2024-05-08");
    let logs = append(
        &LogsByDate::new(),
        date,
        LogEntry::new("Café con Leche", 1.0, "taza", 60),
    );
    let restored = remove_at(&logs, date, 0).unwrap();
    assert_eq!(restored, LogsByDate::new());
    assert!(remove_at(&restored, date, 0).is_err());
}

#[test]
fn service_history_uses_saved_goal() {
    let store = MemoryKvStore::new();
    let service = TrackerService::new(&store).with_fixed_today(day("2024-05-08"));
    for date in ["2024-04-29", "2024-05-01", "2024-05-02"] {
        service
            .log_food(day(date), LogEntry::new("Comida", 1.0, "porción", 2700))
            .unwrap();
    }

    let history = service.week_history(2).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].monday, day("2024-04-29"));
    assert_eq!(history[0].total, 8100);
    assert_eq!(history[0].target, 14_000);
    assert_eq!(history[0].status, WeekStatus::Fail);
    assert_eq!(history[1].status, WeekStatus::NoData);

    let form = ProfileForm {
        weight: "70".to_string(),
        height: "175".to_string(),
        age: "25".to_string(),
        goal: "lose".to_string(),
        ..ProfileForm::default()
    };
    service.save_profile(&form).unwrap();
    let history = service.week_history(1).unwrap();
    assert_eq!(history[0].status, WeekStatus::Success);
}
