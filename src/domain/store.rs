use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::time::SystemTime;

use super::ConnectionRecord;

/// Last sighting per destination address.
///
/// A destination keeps the position of its first insertion; later sightings
/// overwrite the record in place. Rendering is recomputed on every call.
#[derive(Debug, Default)]
pub struct ConnectionStore {
    records: HashMap<IpAddr, ConnectionRecord>,
    order: Vec<IpAddr>,
}

impl ConnectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: ConnectionRecord) {
        let destination = record.destination_ip;
        if self.records.insert(destination, record).is_none() {
            self.order.push(destination);
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, destination: &IpAddr) -> Option<&ConnectionRecord> {
        self.records.get(destination)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ConnectionRecord> {
        self.order.iter().filter_map(move |ip| self.records.get(ip))
    }

    pub fn render(&self) -> Vec<String> {
        self.render_at(SystemTime::now())
    }

    /// Most recent first, grouped by whole seconds since the sighting.
    /// Entries falling in the same second keep insertion order.
    pub fn render_at(&self, now: SystemTime) -> Vec<String> {
        let mut aged: Vec<(u64, &ConnectionRecord)> = self
            .iter()
            .map(|record| (elapsed_secs(now, record.seen), record))
            .collect();
        aged.sort_by_key(|(secs, _)| *secs);

        aged.into_iter()
            .map(|(secs, record)| {
                format!(
                    "{} --> {} Seen: {} secs ago",
                    record.source_endpoint(),
                    record.destination_endpoint(),
                    secs
                )
            })
            .collect()
    }

    pub fn destination_ips(&self) -> Vec<String> {
        unique(self.iter().map(|record| record.destination_ip.to_string()))
    }

    pub fn destination_endpoints(&self) -> Vec<String> {
        unique(self.iter().map(|record| record.destination_endpoint()))
    }

    pub fn all_endpoints(&self) -> Vec<String> {
        unique(
            self.iter()
                .flat_map(|record| [record.destination_endpoint(), record.source_endpoint()]),
        )
    }
}

fn elapsed_secs(now: SystemTime, seen: SystemTime) -> u64 {
    now.duration_since(seen).map(|d| d.as_secs()).unwrap_or(0)
}

fn unique(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values.filter(|value| seen.insert(value.clone())).collect()
}
