//! Aggregation of 3-hour forecast samples into daily summaries.

use std::collections::BTreeMap;

use crate::model::{DayAggregate, ForecastSample};

/// Number of daily summaries the dashboard shows.
pub const MAX_DAYS: usize = 5;

const NOON: i32 = 12;

/// Collapse raw samples into at most [`MAX_DAYS`] daily summaries, ordered
/// by ascending date.
///
/// Samples are grouped on the date portion of their timestamp; samples
/// without one are skipped. Within a day, min/max fold over the
/// temperature-bearing samples, humidity averages over the readings that
/// are present, and the representative condition/icon comes from the sample
/// closest to 12:00 (first seen wins on ties).
pub fn aggregate(samples: &[ForecastSample]) -> Vec<DayAggregate> {
    let mut days: BTreeMap<&str, DayAccumulator> = BTreeMap::new();

    for sample in samples {
        let Some(date) = day_key(&sample.timestamp) else {
            continue;
        };
        days.entry(date)
            .or_insert_with(|| DayAccumulator::new(sample))
            .fold(sample);
    }

    days.into_iter()
        .take(MAX_DAYS)
        .map(|(date, acc)| acc.finish(date.to_string()))
        .collect()
}

/// Date portion of "YYYY-MM-DD HH:MM:SS".
fn day_key(timestamp: &str) -> Option<&str> {
    timestamp.get(..10)
}

/// Hour portion, chars 11..13. Absent when the timestamp is short or odd.
fn hour_of(timestamp: &str) -> Option<i32> {
    timestamp.get(11..13)?.parse().ok()
}

struct DayAccumulator {
    min: Option<f64>,
    max: Option<f64>,
    humidity_sum: f64,
    humidity_count: u32,
    /// Smallest `|hour - 12|` seen so far, with that sample's condition/icon.
    best: Option<(i32, String, String)>,
    /// First-seen condition/icon, used when no sample has a parseable hour.
    first: (String, String),
}

impl DayAccumulator {
    fn new(sample: &ForecastSample) -> Self {
        Self {
            min: None,
            max: None,
            humidity_sum: 0.0,
            humidity_count: 0,
            best: None,
            first: (sample.condition.clone(), sample.icon.clone()),
        }
    }

    fn fold(&mut self, sample: &ForecastSample) {
        if let Some(temp) = sample.temperature {
            self.min = Some(self.min.map_or(temp, |m| m.min(temp)));
            self.max = Some(self.max.map_or(temp, |m| m.max(temp)));
        }

        if let Some(humidity) = sample.humidity {
            self.humidity_sum += humidity;
            self.humidity_count += 1;
        }

        if let Some(hour) = hour_of(&sample.timestamp) {
            let dist = (hour - NOON).abs();
            // strict <, so the first-seen minimum survives ties
            if self.best.as_ref().is_none_or(|(best, _, _)| dist < *best) {
                self.best = Some((dist, sample.condition.clone(), sample.icon.clone()));
            }
        }
    }

    fn finish(self, date: String) -> DayAggregate {
        let avg_humidity = (self.humidity_count > 0)
            .then(|| (self.humidity_sum / f64::from(self.humidity_count)).round() as u8);

        let (condition, icon) = match self.best {
            Some((_, condition, icon)) => (condition, icon),
            None => self.first,
        };

        DayAggregate {
            date,
            min: self.min,
            max: self.max,
            avg_humidity,
            condition,
            icon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ts: &str, temp: f64, humidity: f64, condition: &str, icon: &str) -> ForecastSample {
        ForecastSample {
            timestamp: ts.to_string(),
            temperature: Some(temp),
            humidity: Some(humidity),
            condition: condition.to_string(),
            icon: icon.to_string(),
        }
    }

    #[test]
    fn noon_sample_is_representative() {
        let samples = vec![
            sample("2025-06-01 09:00:00", 20.0, 60.0, "Clouds", "03d"),
            sample("2025-06-01 12:00:00", 25.0, 50.0, "Clear", "01d"),
            sample("2025-06-01 15:00:00", 23.0, 55.0, "Clouds", "03d"),
        ];

        let days = aggregate(&samples);
        assert_eq!(days.len(), 1);

        let day = &days[0];
        assert_eq!(day.date, "2025-06-01");
        assert_eq!(day.min, Some(20.0));
        assert_eq!(day.max, Some(25.0));
        assert_eq!(day.avg_humidity, Some(55));
        assert_eq!(day.condition, "Clear");
        assert_eq!(day.icon, "01d");
    }

    #[test]
    fn first_seen_wins_noon_distance_ties() {
        // 09:00 and 15:00 are both 3 hours from noon
        let samples = vec![
            sample("2025-06-01 09:00:00", 20.0, 60.0, "Clouds", "03d"),
            sample("2025-06-01 15:00:00", 23.0, 55.0, "Rain", "10d"),
        ];

        let days = aggregate(&samples);
        assert_eq!(days[0].condition, "Clouds");
        assert_eq!(days[0].icon, "03d");
    }

    #[test]
    fn five_day_forty_sample_feed_gives_five_sorted_days() {
        let mut samples = Vec::new();
        for day in 1..=5 {
            for slot in 0..8 {
                samples.push(sample(
                    &format!("2025-06-{day:02} {:02}:00:00", slot * 3),
                    15.0 + f64::from(slot),
                    50.0,
                    "Clouds",
                    "03d",
                ));
            }
        }
        assert_eq!(samples.len(), 40);

        let days = aggregate(&samples);
        assert_eq!(days.len(), 5);

        let dates: Vec<&str> = days.iter().map(|d| d.date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort_unstable();
        assert_eq!(dates, sorted);

        for day in &days {
            assert!(day.min <= day.max);
            assert_eq!(day.min, Some(15.0));
            assert_eq!(day.max, Some(22.0));
        }
    }

    #[test]
    fn output_is_capped_to_five_days() {
        let samples: Vec<_> = (1..=7)
            .map(|day| sample(&format!("2025-06-{day:02} 12:00:00"), 20.0, 50.0, "Clear", "01d"))
            .collect();

        let days = aggregate(&samples);
        assert_eq!(days.len(), 5);
        assert_eq!(days.last().unwrap().date, "2025-06-05");
    }

    #[test]
    fn unordered_input_still_sorts_by_date() {
        let samples = vec![
            sample("2025-06-03 12:00:00", 22.0, 50.0, "Rain", "10d"),
            sample("2025-06-01 12:00:00", 20.0, 50.0, "Clear", "01d"),
            sample("2025-06-02 12:00:00", 21.0, 50.0, "Clouds", "03d"),
        ];

        let dates: Vec<String> = aggregate(&samples).into_iter().map(|d| d.date).collect();
        assert_eq!(dates, ["2025-06-01", "2025-06-02", "2025-06-03"]);
    }

    #[test]
    fn samples_without_timestamp_are_skipped() {
        let samples = vec![
            ForecastSample {
                timestamp: String::new(),
                temperature: Some(99.0),
                humidity: None,
                condition: "Clear".to_string(),
                icon: "01d".to_string(),
            },
            sample("2025-06-01 12:00:00", 20.0, 50.0, "Clouds", "03d"),
        ];

        let days = aggregate(&samples);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].max, Some(20.0));
    }

    #[test]
    fn missing_temperatures_do_not_block_other_fields() {
        let samples = vec![
            ForecastSample {
                timestamp: "2025-06-01 12:00:00".to_string(),
                temperature: None,
                humidity: Some(80.0),
                condition: "Mist".to_string(),
                icon: "50d".to_string(),
            },
            ForecastSample {
                timestamp: "2025-06-01 15:00:00".to_string(),
                temperature: Some(18.0),
                humidity: None,
                condition: "Clouds".to_string(),
                icon: "03d".to_string(),
            },
        ];

        let day = &aggregate(&samples)[0];
        assert_eq!(day.min, Some(18.0));
        assert_eq!(day.max, Some(18.0));
        assert_eq!(day.avg_humidity, Some(80));
        assert_eq!(day.condition, "Mist");
    }

    #[test]
    fn humidity_absent_when_no_sample_carries_it() {
        let mut s = sample("2025-06-01 12:00:00", 20.0, 0.0, "Clear", "01d");
        s.humidity = None;

        let day = &aggregate(&[s])[0];
        assert_eq!(day.avg_humidity, None);
    }

    #[test]
    fn date_only_timestamp_falls_back_to_first_seen() {
        let samples = vec![
            ForecastSample {
                timestamp: "2025-06-01".to_string(),
                temperature: Some(20.0),
                humidity: None,
                condition: "Snow".to_string(),
                icon: "13d".to_string(),
            },
            ForecastSample {
                timestamp: "2025-06-01".to_string(),
                temperature: Some(22.0),
                humidity: None,
                condition: "Clear".to_string(),
                icon: "01d".to_string(),
            },
        ];

        let day = &aggregate(&samples)[0];
        assert_eq!(day.condition, "Snow");
        assert_eq!(day.icon, "13d");
        assert_eq!(day.max, Some(22.0));
    }

    #[test]
    fn aggregation_is_deterministic() {
        let samples: Vec<_> = (1..=5)
            .flat_map(|day| {
                (0..8).map(move |slot| {
                    sample(
                        &format!("2025-06-{day:02} {:02}:00:00", slot * 3),
                        10.0 + f64::from(day) + f64::from(slot),
                        40.0 + f64::from(slot),
                        "Clouds",
                        "03d",
                    )
                })
            })
            .collect();

        assert_eq!(aggregate(&samples), aggregate(&samples));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(aggregate(&[]).is_empty());
    }
}
