use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{Checkin, DeviceId};

pub type SharedRegistry = Arc<Registry>;

/// Last check-in per configured device.
///
/// The key set is fixed at construction, so lookups need no lock. Each entry
/// has its own lock: touches on different devices never contend, and a reader
/// sees either the old or the new check-in, never a mix.
#[derive(Debug)]
pub struct Registry {
    order: Vec<DeviceId>,
    entries: HashMap<DeviceId, RwLock<Option<Checkin>>>,
}

impl Registry {
    /// Repeated ids keep their first position.
    pub fn new(devices: impl IntoIterator<Item = DeviceId>) -> Self {
        let mut order = Vec::new();
        let mut entries = HashMap::new();

        for device in devices {
            if entries.contains_key(&device) {
                continue;
            }
            entries.insert(device.clone(), RwLock::new(None));
            order.push(device);
        }

        Self { order, entries }
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn contains(&self, device: &str) -> bool {
        self.entries.contains_key(device)
    }

    /// Devices in configured order.
    pub fn devices(&self) -> &[DeviceId] {
        &self.order
    }

    /// Records a check-in at the current time.
    pub fn touch(&self, device: &str) -> Result<Checkin, ApiError> {
        self.touch_at(device, Checkin::now())
    }

    pub(crate) fn touch_at(&self, device: &str, checkin: Checkin) -> Result<Checkin, ApiError> {
        let entry = self.entries.get(device).ok_or(ApiError::UnknownDevice)?;
        *entry.write() = Some(checkin);
        Ok(checkin)
    }

    pub fn get(&self, device: &str) -> Result<Option<Checkin>, ApiError> {
        self.entries
            .get(device)
            .map(|entry| *entry.read())
            .ok_or(ApiError::UnknownDevice)
    }

    /// Every device with its last check-in, in configured order. Entries are
    /// read one at a time; there is no cut across devices.
    pub fn snapshot(&self) -> Vec<(DeviceId, Option<Checkin>)> {
        self.order
            .iter()
            .map(|device| {
                let last = self.entries.get(device).and_then(|entry| *entry.read());
                (device.clone(), last)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn ids(names: &[&str]) -> Vec<DeviceId> {
        names.iter().filter_map(|n| DeviceId::normalize(n)).collect()
    }

    #[test]
    fn new_registry_has_no_checkins() {
        let registry = Registry::new(ids(&["alpha", "beta"]));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("alpha"), Ok(None));
        assert_eq!(registry.get("beta"), Ok(None));
    }

    #[test]
    fn touch_records_checkin() {
        let registry = Registry::new(ids(&["alpha", "beta"]));
        let checkin = registry.touch("alpha").unwrap();
        assert_eq!(registry.get("alpha"), Ok(Some(checkin)));
        assert_eq!(registry.get("beta"), Ok(None));
    }

    #[test]
    fn repeated_touch_never_goes_backwards() {
        let registry = Registry::new(ids(&["alpha"]));
        let first = registry.touch("alpha").unwrap();
        let second = registry.touch("alpha").unwrap();
        assert!(second.at >= first.at);
        assert_eq!(registry.get("alpha").unwrap().map(|c| c.at), Some(second.at));
    }

    #[test]
    fn unknown_device_is_rejected_without_creating_entry() {
        let registry = Registry::new(ids(&["alpha"]));
        assert_eq!(registry.touch("gamma"), Err(ApiError::UnknownDevice));
        assert_eq!(registry.get("gamma"), Err(ApiError::UnknownDevice));
        assert!(!registry.contains("gamma"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.snapshot().len(), 1);
    }

    #[test]
    fn snapshot_keeps_configured_order() {
        let registry = Registry::new(ids(&["zulu", "alpha", "mike", "alpha"]));
        registry.touch("mike").unwrap();

        let snapshot = registry.snapshot();
        let names: Vec<&str> = snapshot.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(names, ["zulu", "alpha", "mike"]);
        assert!(snapshot[0].1.is_none());
        assert!(snapshot[2].1.is_some());
    }

    #[test]
    fn touch_at_overwrites_previous_value() {
        let registry = Registry::new(ids(&["alpha"]));
        let old = Checkin::now();
        let newer = Checkin {
            at: old.at + Duration::from_secs(10),
            wall: old.wall + chrono::Duration::seconds(10),
        };
        registry.touch_at("alpha", old).unwrap();
        registry.touch_at("alpha", newer).unwrap();
        assert_eq!(registry.get("alpha"), Ok(Some(newer)));
    }

    #[test]
    fn concurrent_touches_and_reads() {
        let names: Vec<String> = (0..8).map(|i| format!("device-{i}")).collect();
        let registry = Registry::new(names.iter().filter_map(|n| DeviceId::normalize(n)));

        thread::scope(|scope| {
            for name in &names {
                let registry = &registry;
                scope.spawn(move || {
                    for _ in 0..500 {
                        registry.touch(name).unwrap();
                    }
                });
                scope.spawn(move || {
                    for _ in 0..500 {
                        for (_, last) in registry.snapshot() {
                            if let Some(checkin) = last {
                                assert!(checkin.wall.timestamp() > 0);
                            }
                        }
                    }
                });
            }
        });

        for (device, last) in registry.snapshot() {
            assert!(last.is_some(), "{device} was never recorded");
        }
        assert_eq!(registry.len(), names.len());
    }
}
