use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;

use daylight::clock::{ClockSettings, shift_table};
use daylight::engine::{Light, average_daylight, classify_day, weave};
use daylight::table::{DayRecord, Event, EventTable};

const DAY: i64 = 86_400;
const HOUR: f64 = 3_600.0;
const YEAR: i32 = 2018;

/// Sunrise, day length, dawn and dusk lengths, all in seconds.
type DayShape = (i64, i64, i64, i64);

fn day_shape_strategy() -> impl Strategy<Value = DayShape> {
    (3_600i64..40_000, 0i64..40_000, 0i64..3_600, 0i64..3_600)
}

fn year_strategy() -> impl Strategy<Value = Vec<DayShape>> {
    proptest::collection::vec(day_shape_strategy(), 365)
}

fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => (-3_600i64..90_000).prop_map(Event::Occurs),
        1 => Just(Event::NeverOccurs),
    ]
}

fn record(date: NaiveDate, shape: DayShape) -> DayRecord {
    let (sunrise, length, dawn, dusk) = shape;
    let sunset = sunrise + length;
    DayRecord {
        date,
        twilight_begin: Event::Occurs(sunrise - dawn),
        sunrise: Event::Occurs(sunrise),
        noon: Event::Occurs(sunrise + length / 2),
        sunset: Event::Occurs(sunset),
        twilight_end: Event::Occurs(sunset + dusk),
    }
}

fn table_from_shapes(shapes: &[DayShape]) -> EventTable {
    let first = NaiveDate::from_ymd_opt(YEAR, 1, 1).unwrap();
    let days = shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| record(first + Duration::days(i as i64), *shape))
        .collect();
    EventTable::new(days).unwrap()
}

fn monthly_means(shapes: &[DayShape], value: impl Fn(&DayShape) -> i64) -> [f64; 12] {
    let first = NaiveDate::from_ymd_opt(YEAR, 1, 1).unwrap();
    let mut sums = [0.0; 12];
    let mut counts = [0.0; 12];
    for (i, shape) in shapes.iter().enumerate() {
        let month = (first + Duration::days(i as i64)).month0() as usize;
        sums[month] += value(shape) as f64 / HOUR;
        counts[month] += 1.0;
    }
    let mut means = [0.0; 12];
    for m in 0..12 {
        means[m] = sums[m] / counts[m];
    }
    means
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[cfg(test)]
mod window_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Over a whole day the window sees each day's full light periods.
        #[test]
        fn test_full_day_window_sees_whole_day(shapes in year_strategy()) {
            let table = table_from_shapes(&shapes);
            let averages = average_daylight(&table, 0, DAY).unwrap();

            let sunlight = monthly_means(&shapes, |s| s.1);
            let twilight = monthly_means(&shapes, |s| s.2 + s.3);
            for m in 0..12 {
                prop_assert!(approx(averages.sunlight.values()[m], sunlight[m]));
                prop_assert!(approx(averages.twilight.values()[m], twilight[m]));
            }
        }

        /// A window past midnight is the evening part plus the small hours of
        /// the records re-attributed to the previous day.
        #[test]
        fn test_window_past_midnight_is_additive(
            shapes in year_strategy(),
            start in 0i64..DAY,
            extra in 1i64..DAY,
        ) {
            prop_assume!(extra <= start);
            let stop = DAY + extra;
            let table = table_from_shapes(&shapes);

            let whole = average_daylight(&table, start, stop).unwrap();
            let evening = average_daylight(&table, start, DAY).unwrap();
            let night = average_daylight(&table.shift_back_one_day(), 0, stop - DAY).unwrap();

            for m in 0..12 {
                let sunlight = evening.sunlight.values()[m] + night.sunlight.values()[m];
                let twilight = evening.twilight.values()[m] + night.twilight.values()[m];
                prop_assert!(approx(whole.sunlight.values()[m], sunlight));
                prop_assert!(approx(whole.twilight.values()[m], twilight));
            }
        }

        /// Light inside a window is never negative and never exceeds the window.
        #[test]
        fn test_light_is_bounded_by_window(
            shapes in year_strategy(),
            start in 0i64..DAY,
            length in 1i64..=DAY,
        ) {
            let table = table_from_shapes(&shapes);
            let averages = average_daylight(&table, start, start + length).unwrap();
            let hours = length as f64 / HOUR;

            for m in 0..12 {
                let sunlight = averages.sunlight.values()[m];
                let twilight = averages.twilight.values()[m];
                prop_assert!(sunlight.is_finite() && twilight.is_finite());
                prop_assert!(sunlight >= 0.0 && twilight >= 0.0);
                prop_assert!(sunlight + twilight <= hours + 1e-9);
            }
        }
    }
}

#[cfg(test)]
mod classifier_properties {
    use super::*;

    fn begun(event: Event, instant: i64) -> bool {
        match event {
            Event::Occurs(s) => instant >= s,
            Event::NeverOccurs => true,
        }
    }

    fn ended(event: Event, instant: i64) -> bool {
        match event {
            Event::Occurs(s) => instant >= s,
            Event::NeverOccurs => false,
        }
    }

    proptest! {
        /// Sunlight wins over twilight whatever the twilight events say.
        #[test]
        fn test_sunlight_takes_precedence(
            events in proptest::collection::vec(event_strategy(), 5),
            instant in -3_600i64..90_000,
        ) {
            let day = DayRecord {
                date: NaiveDate::from_ymd_opt(YEAR, 6, 1).unwrap(),
                twilight_begin: events[0],
                sunrise: events[1],
                noon: events[2],
                sunset: events[3],
                twilight_end: events[4],
            };

            let sunlit = begun(day.sunrise, instant) && !ended(day.sunset, instant);
            let twilight = begun(day.twilight_begin, instant) && !ended(day.twilight_end, instant);
            let expected = if sunlit {
                Light::Daylight
            } else if twilight {
                Light::Twilight
            } else {
                Light::Night
            };
            prop_assert_eq!(classify_day(&day, instant), expected);
        }
    }
}

#[cfg(test)]
mod clock_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        /// Without an offset and without DST every clock shows the UTC table.
        #[test]
        fn test_zero_shift_is_identity(shapes in year_strategy()) {
            let table = table_from_shapes(&shapes);
            prop_assert_eq!(&shift_table(&table, 0), &table);

            let clock = ClockSettings::utc();
            let tables = clock.tables(&table);
            prop_assert_eq!(&tables.local, &table);
            prop_assert_eq!(&tables.dst, &table);

            let carpets = clock.carpets(&table);
            prop_assert_eq!(carpets.local.thread(), carpets.utc.thread());
            prop_assert_eq!(carpets.dst.thread(), carpets.utc.thread());
        }

        /// Rolling and applying DST commute wherever a minute and its rolled
        /// source lie on the same side of the DST range.
        #[test]
        fn test_roll_and_dst_commute_away_from_boundaries(
            shapes in year_strategy(),
            offset in -720i64..=840,
            first_day in 0usize..300,
            length in 1usize..60,
        ) {
            let carpet = weave(&table_from_shapes(&shapes));
            let ranges = [first_day..first_day + length];

            let rolled_then_dst = carpet.shifted(offset).with_dst(&ranges);
            let dst_then_rolled = carpet.with_dst(&ranges).shifted(offset);

            let n = carpet.thread().len() as i64;
            let inside = |minute: i64| {
                let day = minute.rem_euclid(n) as usize / 1_440;
                ranges[0].contains(&day)
            };
            for i in 0..n {
                if inside(i) == inside(i - offset) {
                    prop_assert_eq!(
                        rolled_then_dst.thread()[i as usize],
                        dst_then_rolled.thread()[i as usize]
                    );
                }
            }
        }
    }
}
