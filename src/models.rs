use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered label → value mapping driving one chart.
///
/// Insertion order is display order. Labels are unique: inserting an existing
/// label overwrites its value but keeps the original position, matching the
/// JSON-object semantics of the backend payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset(IndexMap<String, f64>);

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: f64) {
        self.0.insert(label.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.values().copied()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(label).copied()
    }

    /// Scale ceiling used for chart geometry: `max(0, max(values))`.
    ///
    /// Never negative, and 0 for an empty or all-negative dataset, which is
    /// the divide-by-zero guard for bar/point heights.
    pub fn scale_max(&self) -> f64 {
        self.0.values().fold(0.0f64, |acc, v| acc.max(*v))
    }
}

impl FromIterator<(String, f64)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut out = Dataset::new();
        for (label, value) in iter {
            out.insert(label, value);
        }
        out
    }
}

impl<'a> FromIterator<(&'a str, f64)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .collect()
    }
}

/// Overview stats from `/api/overview`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Overview {
    pub active_projects: u32,
    pub active_clients: u32,
    pub total_clients: u32,
    pub total_revenue: f64,
    pub pending_revenue: f64,
    pub paid_invoices: u32,
    pub pending_invoices: u32,
    pub overdue_invoices: u32,
    pub hours_this_month: f64,
    pub billable_hours_month: f64,
    pub utilization_rate: f64,
}

/// Revenue aggregation from `/api/revenue`; `monthly` feeds the revenue chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueReport {
    pub monthly: Dataset,
    pub total: f64,
    pub average: f64,
}

/// Billable/non-billable split per client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClientHours {
    pub billable: f64,
    pub non_billable: f64,
}

/// Hours aggregation from `/api/time-tracking`; `by_date` feeds the hours chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeTrackingReport {
    pub total_hours: f64,
    pub billable_hours: f64,
    pub non_billable_hours: f64,
    pub utilization_rate: f64,
    pub by_client: IndexMap<String, ClientHours>,
    pub by_date: Dataset,
}

/// One project row from `/api/projects`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: Option<String>,
    pub title: String,
    pub client: String,
    pub status: String,
    pub priority: String,
    pub billable: bool,
    pub estimated_hours: f64,
    pub hours_logged: f64,
    pub created_at: String,
    pub due_date: String,
}

/// One client row from `/api/clients`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub status: String,
    pub health_score: f64,
    pub health_status: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_display_order() {
        let mut d = Dataset::new();
        d.insert("Mar", 3.0);
        d.insert("Jan", 1.0);
        d.insert("Feb", 2.0);
        let labels: Vec<&str> = d.labels().collect();
        assert_eq!(labels, vec!["Mar", "Jan", "Feb"]);
    }

    #[test]
    fn reinsert_keeps_position_and_overwrites() {
        let mut d = Dataset::new();
        d.insert("a", 1.0);
        d.insert("b", 2.0);
        d.insert("a", 9.0);
        let pairs: Vec<(&str, f64)> = d.iter().collect();
        assert_eq!(pairs, vec![("a", 9.0), ("b", 2.0)]);
    }

    #[test]
    fn scale_max_clamps_to_zero() {
        let d: Dataset = [("x", -5.0), ("y", -1.0)].into_iter().collect();
        assert_eq!(d.scale_max(), 0.0);
        assert_eq!(Dataset::new().scale_max(), 0.0);

        let d: Dataset = [("x", -5.0), ("y", 7.5)].into_iter().collect();
        assert_eq!(d.scale_max(), 7.5);
    }

    #[test]
    fn dataset_deserializes_from_json_object_in_order() {
        let d: Dataset =
            serde_json::from_str(r#"{"2025-06": 1200.0, "2025-05": 0, "2025-07": 450.5}"#).unwrap();
        let labels: Vec<&str> = d.labels().collect();
        assert_eq!(labels, vec!["2025-06", "2025-05", "2025-07"]);
        assert_eq!(d.get("2025-05"), Some(0.0));
    }
}
