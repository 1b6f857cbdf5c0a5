// Forecast aggregation - daily summaries and same-day buckets
use super::forecast::{
    round_half_up, DaySummary, ForecastSample, HighlightThresholds, TodayEntry, TodayRollup,
    TodayView,
};
use chrono::{DateTime, Timelike, Utc};
use std::collections::HashMap;

pub const MAX_FORECAST_DAYS: usize = 5;

/// Shift a UTC timestamp by a flat offset and read the result as a UTC instant.
/// Returns None when the shifted value leaves chrono's range.
pub fn local_instant(timestamp_utc_seconds: i64, timezone_offset_seconds: i64) -> Option<DateTime<Utc>> {
    let shifted = timestamp_utc_seconds.checked_add(timezone_offset_seconds)?;
    DateTime::from_timestamp(shifted, 0)
}

/// Canonical `YYYY-MM-DD` for the local calendar date of a timestamp
pub fn local_date_key(timestamp_utc_seconds: i64, timezone_offset_seconds: i64) -> Option<String> {
    local_instant(timestamp_utc_seconds, timezone_offset_seconds).map(|d| date_key(&d))
}

fn date_key(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

fn is_local_noon(instant: &DateTime<Utc>) -> bool {
    instant.hour() == 12 && instant.minute() == 0 && instant.second() == 0
}

struct DayGroup<'a> {
    key: String,
    first_local: DateTime<Utc>,
    samples: Vec<(DateTime<Utc>, &'a ForecastSample)>,
}

/// Group samples by local date, keeping the order in which keys were first seen
fn group_by_local_date(samples: &[ForecastSample], timezone_offset_seconds: i64) -> Vec<DayGroup<'_>> {
    let mut groups: Vec<DayGroup<'_>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sample in samples {
        let Some(local) = local_instant(sample.timestamp_utc_seconds, timezone_offset_seconds) else {
            tracing::debug!(
                "Skipping sample with out-of-range timestamp {}",
                sample.timestamp_utc_seconds
            );
            continue;
        };
        let key = date_key(&local);

        match index.get(&key) {
            Some(&i) => groups[i].samples.push((local, sample)),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(DayGroup {
                    key,
                    first_local: local,
                    samples: vec![(local, sample)],
                });
            }
        }
    }

    groups
}

fn summarize_group(group: DayGroup<'_>) -> DaySummary {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (_, sample) in &group.samples {
        if let Some(t) = sample.temperature_min {
            min = min.min(t);
        }
        if let Some(t) = sample.temperature_max {
            max = max.max(t);
        }
    }

    let representative = group
        .samples
        .iter()
        .find(|(local, _)| is_local_noon(local))
        .unwrap_or(&group.samples[group.samples.len() / 2]);

    DaySummary {
        date_key: group.key,
        temperature_min: min,
        temperature_max: max,
        representative_icon: representative.1.condition_icon.clone(),
        local_date: group.first_local,
    }
}

/// Daily min/max summaries for up to five local dates, earliest first.
///
/// Days whose samples define no temperature keep the `+inf`/`-inf` seeds;
/// see [`DaySummary::has_temperature_bounds`].
pub fn summarize_five_day(samples: &[ForecastSample], timezone_offset_seconds: i64) -> Vec<DaySummary> {
    let mut days: Vec<DaySummary> = group_by_local_date(samples, timezone_offset_seconds)
        .into_iter()
        .map(summarize_group)
        .collect();

    days.sort_by_key(|d| d.local_date);
    days.truncate(MAX_FORECAST_DAYS);
    days
}

/// Same-day view using the default highlight thresholds
pub fn summarize_today(samples: &[ForecastSample], timezone_offset_seconds: i64, now_millis: i64) -> TodayView {
    summarize_today_with(
        samples,
        timezone_offset_seconds,
        now_millis,
        &HighlightThresholds::default(),
    )
}

pub fn summarize_today_with(
    samples: &[ForecastSample],
    timezone_offset_seconds: i64,
    now_millis: i64,
    thresholds: &HighlightThresholds,
) -> TodayView {
    let today_key = timezone_offset_seconds
        .checked_mul(1000)
        .and_then(|offset_ms| now_millis.checked_add(offset_ms))
        .and_then(DateTime::from_timestamp_millis)
        .map(|d| date_key(&d));

    let Some(today_key) = today_key else {
        tracing::debug!("Reference time {} is out of range", now_millis);
        return TodayView::no_data(String::new());
    };

    let todays: Vec<(DateTime<Utc>, &ForecastSample)> = samples
        .iter()
        .filter_map(|s| {
            local_instant(s.timestamp_utc_seconds, timezone_offset_seconds).map(|local| (local, s))
        })
        .filter(|(local, _)| date_key(local) == today_key)
        .collect();

    if todays.is_empty() {
        return TodayView::no_data(today_key);
    }

    let mut max_probability = 0.0_f64;
    let mut total_volume_mm = 0.0;
    let mut has_any_rain_signal = false;
    let mut entries = Vec::with_capacity(todays.len());

    for (local, sample) in todays {
        let probability_pct = sample.probability_pct();
        let volume_mm = sample.volume_mm();

        if let Some(p) = sample.precipitation_probability {
            max_probability = max_probability.max(p);
        }
        total_volume_mm += volume_mm;
        if probability_pct > 0 || volume_mm > 0.0 {
            has_any_rain_signal = true;
        }

        entries.push(TodayEntry {
            timestamp_utc_seconds: sample.timestamp_utc_seconds,
            local_time: local,
            display_temperature: sample.temperature_current.map(|t| round_half_up(t) as i64),
            probability_pct,
            volume_mm,
            highlight: thresholds.classify(probability_pct, volume_mm),
            condition_icon: sample.condition_icon.clone(),
            condition_description: sample.condition_description.clone(),
        });
    }

    TodayView {
        today_key,
        entries,
        rollup: Some(TodayRollup {
            max_probability_pct: round_half_up(max_probability * 100.0) as u32,
            total_volume_mm,
        }),
        has_any_rain_signal,
    }
}
