use std::collections::HashMap;

use chrono::Timelike;
use serde::Serialize;

use crate::domain::models::rating::RatingRow;
use crate::domain::models::wine::Wine;

const STAR_BUCKETS: usize = 5;
const HOUR_BUCKETS: usize = 24;
const TOP_DESCRIPTORS: usize = 10;

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_ratings: usize,
    pub average_rating: f64,
    pub wines: Vec<WineStats>,
    pub distribution: Vec<DistributionBucket>,
    pub hourly_activity: Vec<HourlyBucket>,
    pub top_descriptors: Vec<DescriptorCount>,
    pub attendees: Vec<AttendeeStats>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WineStats {
    pub wine_id: String,
    pub name: String,
    pub producer: String,
    pub ratings: usize,
    pub average: f64,
    pub notes: usize,
    pub sample_note: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionBucket {
    pub stars: i32,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyBucket {
    pub hour: u32,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeStats {
    pub profile_id: String,
    pub display_name: String,
    pub email: String,
    pub ratings: usize,
    pub average: f64,
}

/// Derives every analytics rollup from one snapshot of rating rows, so the
/// totals stay mutually consistent. Pure and deterministic; an empty input
/// yields a zeroed summary.
pub fn aggregate(rows: &[RatingRow], wines: &[Wine]) -> AnalyticsSummary {
    let total_ratings = rows.len();
    let star_sum: i64 = rows.iter().map(|r| r.stars as i64).sum();
    let average_rating = mean(star_sum, total_ratings);

    AnalyticsSummary {
        total_ratings,
        average_rating,
        wines: wine_rollup(rows, wines),
        distribution: distribution(rows),
        hourly_activity: hourly_activity(rows),
        top_descriptors: descriptor_frequency(rows),
        attendees: attendee_rollup(rows),
    }
}

fn wine_rollup(rows: &[RatingRow], wines: &[Wine]) -> Vec<WineStats> {
    wines
        .iter()
        .map(|wine| {
            let mut count = 0usize;
            let mut star_sum = 0i64;
            let mut notes = 0usize;
            let mut sample_note = None;

            for row in rows.iter().filter(|r| r.wine_id == wine.id) {
                count += 1;
                star_sum += row.stars as i64;
                if let Some(note) = row.note.as_deref().filter(|n| !n.trim().is_empty()) {
                    notes += 1;
                    if sample_note.is_none() {
                        sample_note = Some(note.to_string());
                    }
                }
            }

            WineStats {
                wine_id: wine.id.clone(),
                name: wine.name.clone(),
                producer: wine.producer.clone(),
                ratings: count,
                average: mean(star_sum, count),
                notes,
                sample_note,
            }
        })
        .collect()
}

fn distribution(rows: &[RatingRow]) -> Vec<DistributionBucket> {
    let mut counts = [0usize; STAR_BUCKETS];
    for row in rows {
        if (1..=STAR_BUCKETS as i32).contains(&row.stars) {
            counts[(row.stars - 1) as usize] += 1;
        }
    }

    let total = rows.len();
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| DistributionBucket {
            stars: i as i32 + 1,
            count,
            percentage: if total == 0 {
                0.0
            } else {
                round1(count as f64 * 100.0 / total as f64)
            },
        })
        .collect()
}

fn hourly_activity(rows: &[RatingRow]) -> Vec<HourlyBucket> {
    let mut counts = [0usize; HOUR_BUCKETS];
    for row in rows {
        counts[row.created_at.hour() as usize] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(hour, &count)| HourlyBucket { hour: hour as u32, count })
        .collect()
}

fn descriptor_frequency(rows: &[RatingRow]) -> Vec<DescriptorCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        for name in &row.descriptors {
            *counts.entry(name.as_str()).or_default() += 1;
        }
    }

    let mut ranked: Vec<DescriptorCount> = counts
        .into_iter()
        .map(|(name, count)| DescriptorCount { name: name.to_string(), count })
        .collect();
    // Name as tiebreaker keeps the ranking stable across runs.
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(TOP_DESCRIPTORS);
    ranked
}

fn attendee_rollup(rows: &[RatingRow]) -> Vec<AttendeeStats> {
    struct Acc<'a> {
        display_name: Option<&'a str>,
        email: Option<&'a str>,
        count: usize,
        star_sum: i64,
    }

    let mut by_profile: HashMap<&str, Acc> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for row in rows {
        let acc = by_profile.entry(row.profile_id.as_str()).or_insert_with(|| {
            order.push(row.profile_id.as_str());
            Acc { display_name: None, email: None, count: 0, star_sum: 0 }
        });
        acc.count += 1;
        acc.star_sum += row.stars as i64;
        if acc.display_name.is_none() {
            acc.display_name = row.rater_name.as_deref();
        }
        if acc.email.is_none() {
            acc.email = row.rater_email.as_deref();
        }
    }

    let mut attendees: Vec<AttendeeStats> = order
        .into_iter()
        .map(|profile_id| {
            let acc = &by_profile[profile_id];
            AttendeeStats {
                profile_id: profile_id.to_string(),
                display_name: acc.display_name.unwrap_or("Guest").to_string(),
                email: acc
                    .email
                    .map(str::to_string)
                    .unwrap_or_else(|| placeholder_email(profile_id)),
                ratings: acc.count,
                average: mean(acc.star_sum, acc.count),
            }
        })
        .collect();

    attendees.sort_by(|a, b| b.ratings.cmp(&a.ratings).then_with(|| a.display_name.cmp(&b.display_name)));
    attendees
}

/// Rollup rows must always carry an email-shaped string (the CSV export
/// depends on it), so a missing joined email gets a synthesized one.
fn placeholder_email(profile_id: &str) -> String {
    let short: String = profile_id.chars().take(8).collect();
    format!("user-{}@example.com", short)
}

fn mean(sum: i64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round1(sum as f64 / count as f64)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(wine_id: &str, profile_id: &str, stars: i32, note: Option<&str>, hour: u32) -> RatingRow {
        RatingRow {
            id: uuid::Uuid::new_v4().to_string(),
            wine_id: wine_id.to_string(),
            profile_id: profile_id.to_string(),
            stars,
            note: note.map(str::to_string),
            would_buy: stars >= 4,
            created_at: Utc.with_ymd_and_hms(2025, 6, 14, hour, 30, 0).unwrap(),
            wine_name: format!("Wine {}", wine_id),
            wine_producer: "Producer".to_string(),
            rater_name: Some(format!("Guest {}", profile_id)),
            rater_email: Some(format!("{}@example.com", profile_id)),
            descriptors: Vec::new(),
        }
    }

    #[test]
    fn test_empty_input_yields_zeroed_summary() {
        let summary = aggregate(&[], &[]);
        assert_eq!(summary.total_ratings, 0);
        assert_eq!(summary.average_rating, 0.0);
        assert!(summary.wines.is_empty());
        assert!(summary.top_descriptors.is_empty());
        assert!(summary.attendees.is_empty());
        assert_eq!(summary.distribution.len(), 5);
        assert!(summary.distribution.iter().all(|b| b.count == 0 && b.percentage == 0.0));
        assert_eq!(summary.hourly_activity.len(), 24);
        assert!(summary.hourly_activity.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_distribution_counts_and_percentages() {
        let rows: Vec<RatingRow> = [5, 4, 3, 5, 2]
            .iter()
            .map(|&s| row("w1", "p1", s, None, 18))
            .collect();

        let summary = aggregate(&rows, &[]);
        assert_eq!(summary.total_ratings, 5);
        assert_eq!(summary.average_rating, 3.8);

        let counts: Vec<usize> = summary.distribution.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![0, 1, 1, 1, 2]);

        let percentages: Vec<f64> = summary.distribution.iter().map(|b| b.percentage).collect();
        assert_eq!(percentages, vec![0.0, 20.0, 20.0, 20.0, 40.0]);

        let count_sum: usize = summary.distribution.iter().map(|b| b.count).sum();
        assert_eq!(count_sum, rows.len());
    }

    #[test]
    fn test_percentage_sum_within_rounding_tolerance() {
        let rows: Vec<RatingRow> = [1, 2, 3, 4, 5, 5, 3]
            .iter()
            .map(|&s| row("w1", "p1", s, None, 12))
            .collect();

        let summary = aggregate(&rows, &[]);
        let pct_sum: f64 = summary.distribution.iter().map(|b| b.percentage).sum();
        assert!((99.0..=101.0).contains(&pct_sum), "pct sum = {}", pct_sum);
    }

    #[test]
    fn test_hourly_buckets() {
        let rows = vec![
            row("w1", "p1", 4, None, 0),
            row("w1", "p1", 4, None, 18),
            row("w1", "p2", 3, None, 18),
            row("w1", "p2", 3, None, 23),
        ];
        let summary = aggregate(&rows, &[]);
        assert_eq!(summary.hourly_activity[0].count, 1);
        assert_eq!(summary.hourly_activity[18].count, 2);
        assert_eq!(summary.hourly_activity[23].count, 1);
        let total: usize = summary.hourly_activity.iter().map(|b| b.count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_descriptor_ranking_truncates_to_ten() {
        let mut rows = Vec::new();
        for i in 0..12 {
            let mut r = row("w1", "p1", 3, None, 10);
            // descriptor "d0" appears 12 times, "d1" 11 times, ...
            for j in i..12 {
                r.descriptors.push(format!("d{}", 11 - j));
            }
            rows.push(r);
        }

        let summary = aggregate(&rows, &[]);
        assert_eq!(summary.top_descriptors.len(), 10);
        assert_eq!(summary.top_descriptors[0].name, "d0");
        assert_eq!(summary.top_descriptors[0].count, 12);
        assert!(summary.top_descriptors.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_attendee_rollup_and_placeholder_email() {
        let mut anonymous = row("w1", "profile-abcdef12345", 5, None, 10);
        anonymous.rater_name = None;
        anonymous.rater_email = None;

        let rows = vec![
            row("w1", "p1", 4, None, 10),
            row("w2", "p1", 2, None, 11),
            anonymous,
        ];

        let summary = aggregate(&rows, &[]);
        assert_eq!(summary.attendees.len(), 2);

        let p1 = summary.attendees.iter().find(|a| a.profile_id == "p1").unwrap();
        assert_eq!(p1.ratings, 2);
        assert_eq!(p1.average, 3.0);

        let anon = summary.attendees.iter().find(|a| a.profile_id != "p1").unwrap();
        assert_eq!(anon.display_name, "Guest");
        assert_eq!(anon.email, "user-profile-@example.com");
        assert_eq!(anon.ratings, 1);
    }

    #[test]
    fn test_wine_rollup_includes_unrated_wines() {
        use crate::domain::models::wine::{NewWineParams, Wine};

        let make_wine = |id: &str, name: &str| {
            let mut w = Wine::new(NewWineParams {
                event_id: "e1".into(),
                location_id: None,
                name: name.into(),
                producer: "P".into(),
                vintage: Some(2019),
                wine_type: "red".into(),
                tasting_order: 1,
                details_json: "{}".into(),
            });
            w.id = id.to_string();
            w
        };
        let wines = vec![make_wine("w1", "Merlot"), make_wine("w2", "Syrah")];

        let rows = vec![
            row("w1", "p1", 5, Some("bold"), 10),
            row("w1", "p2", 4, Some(""), 10),
            row("w1", "p3", 4, Some("smooth finish"), 10),
        ];

        let summary = aggregate(&rows, &wines);
        assert_eq!(summary.wines.len(), 2);

        let w1 = &summary.wines[0];
        assert_eq!(w1.ratings, 3);
        assert_eq!(w1.average, 4.3);
        assert_eq!(w1.notes, 2); // blank note does not count
        assert_eq!(w1.sample_note.as_deref(), Some("bold"));

        let w2 = &summary.wines[1];
        assert_eq!(w2.ratings, 0);
        assert_eq!(w2.average, 0.0);
        assert!(w2.sample_note.is_none());

        let per_wine_sum: usize = summary.wines.iter().map(|w| w.ratings).sum();
        assert_eq!(per_wine_sum, summary.total_ratings);
    }
}
