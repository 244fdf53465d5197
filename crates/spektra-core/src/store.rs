use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::css;
use crate::id::{StopId, StopIdGen};
use crate::model::{ColorStop, GradientConfig, GradientKind, NEW_STOP_POSITION, StopPatch};

/// Error returned by store operations that address a stop by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    StopNotFound(StopId),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StopNotFound(id) => write!(f, "no color stop with id `{id}`"),
        }
    }
}

impl std::error::Error for StoreError {}

// ── GradientStore ─────────────────────────────────────────────────────────

/// Owner of the gradient being edited.
///
/// Every mutation builds a new [`GradientConfig`] and swaps it in whole, so
/// a snapshot taken with [`snapshot`](Self::snapshot) never changes after the
/// fact and never shows a half-applied update. Observers detect changes by
/// comparing snapshots with [`Arc::ptr_eq`] or by watching
/// [`revision`](Self::revision).
///
/// The store is a plain value: the session that owns it passes it around by
/// `&mut`. There is no global instance.
#[derive(Debug)]
pub struct GradientStore {
    current: Arc<GradientConfig>,
    revision: u64,
    ids: StopIdGen,
}

impl GradientStore {
    pub fn new() -> Self {
        Self::with_id_gen(StopIdGen::new())
    }

    /// Store whose stop ids come from `ids` (e.g. a seeded generator).
    pub fn with_id_gen(mut ids: StopIdGen) -> Self {
        let current = Arc::new(GradientConfig::initial(&mut ids));
        Self { current, revision: 0, ids }
    }

    // ── reads ─────────────────────────────────────────────────────────────

    /// Shared handle to the current configuration.
    pub fn snapshot(&self) -> Arc<GradientConfig> {
        Arc::clone(&self.current)
    }

    pub fn config(&self) -> &GradientConfig {
        &self.current
    }

    /// Number of snapshots published since the store was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn stop(&self, id: &StopId) -> Option<&ColorStop> {
        self.current.stop(id)
    }

    /// CSS for the current configuration.
    pub fn css(&self) -> String {
        css::serialize(&self.current)
    }

    // ── mutations ─────────────────────────────────────────────────────────

    pub fn set_kind(&mut self, kind: GradientKind) {
        self.publish(GradientConfig { kind, ..self.fields() });
    }

    /// Replaces the angle. No range check; `-30` and `400` are kept as given.
    pub fn set_angle(&mut self, angle: f64) {
        self.publish(GradientConfig { angle, ..self.fields() });
    }

    /// Replaces both center coordinates in a single snapshot.
    pub fn set_center(&mut self, x: f64, y: f64) {
        self.publish(GradientConfig { center_x: x, center_y: y, ..self.fields() });
    }

    /// Appends a stop at position 50 and returns its new id.
    pub fn add_color_stop(&mut self, color: impl Into<String>) -> StopId {
        let id = self.ids.next_id();
        let mut next = self.fields();
        next.color_stops.push(ColorStop::new(id.clone(), color, NEW_STOP_POSITION));
        self.publish(next);
        id
    }

    /// Merges `patch` into the stop with `id`.
    ///
    /// On a miss nothing is published and the configuration stays as it was.
    pub fn update_color_stop(&mut self, id: &StopId, patch: StopPatch) -> Result<(), StoreError> {
        let index = self
            .current
            .stop_index(id)
            .ok_or_else(|| StoreError::StopNotFound(id.clone()))?;

        let mut next = self.fields();
        next.color_stops[index] = patch.apply(&next.color_stops[index]);
        self.publish(next);
        Ok(())
    }

    /// Removes the stop with `id`. Returns `false` (and publishes nothing) if
    /// no such stop exists, so repeated removals are harmless.
    ///
    /// No minimum stop count is enforced here.
    pub fn remove_color_stop(&mut self, id: &StopId) -> bool {
        let Some(index) = self.current.stop_index(id) else {
            return false;
        };
        let mut next = self.fields();
        next.color_stops.remove(index);
        self.publish(next);
        true
    }

    /// Loads a whole configuration, e.g. one read back from disk.
    ///
    /// Its stop ids are reserved so later [`add_color_stop`](Self::add_color_stop)
    /// calls cannot collide with them. A stop repeating an earlier stop's id
    /// gets a fresh one, so every id keeps addressing exactly one stop.
    pub fn replace(&mut self, mut config: GradientConfig) {
        for stop in &config.color_stops {
            self.ids.register(&stop.id);
        }

        let mut seen = HashSet::new();
        for stop in &mut config.color_stops {
            if !seen.insert(stop.id.clone()) {
                let fresh = self.ids.next_id();
                log::warn!("loaded gradient repeats stop id `{}`; renamed to `{fresh}`", stop.id);
                seen.insert(fresh.clone());
                stop.id = fresh;
            }
        }
        self.publish(config);
    }

    /// Returns to the initial configuration with fresh stop ids.
    pub fn reset(&mut self) {
        let initial = GradientConfig::initial(&mut self.ids);
        self.publish(initial);
    }

    // ── internals ─────────────────────────────────────────────────────────

    /// Owned copy of the current fields, the starting point of every update.
    fn fields(&self) -> GradientConfig {
        GradientConfig::clone(&self.current)
    }

    fn publish(&mut self, next: GradientConfig) {
        self.current = Arc::new(next);
        self.revision += 1;
        log::debug!(
            "gradient r{}: {} stops, {}",
            self.revision,
            self.current.color_stops.len(),
            self.current.kind
        );
    }
}

impl Default for GradientStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> GradientStore {
        GradientStore::with_id_gen(StopIdGen::seeded(11))
    }

    fn ids(store: &GradientStore) -> Vec<StopId> {
        store.config().color_stops.iter().map(|s| s.id.clone()).collect()
    }

    // ── scalar fields ─────────────────────────────────────────────────────

    #[test]
    fn set_kind_leaves_other_fields() {
        let mut s = store();
        let before = s.snapshot();
        s.set_kind(GradientKind::Conic);
        let after = s.snapshot();
        assert_eq!(after.kind, GradientKind::Conic);
        assert_eq!(after.angle, before.angle);
        assert_eq!(after.color_stops, before.color_stops);
    }

    #[test]
    fn set_angle_does_not_clamp() {
        let mut s = store();
        s.set_angle(-30.0);
        assert_eq!(s.config().angle, -30.0);
        s.set_angle(725.5);
        assert_eq!(s.config().angle, 725.5);
    }

    #[test]
    fn set_center_publishes_one_snapshot_with_both_coordinates() {
        let mut s = store();
        let rev = s.revision();
        s.set_center(12.0, 88.0);
        assert_eq!(s.revision(), rev + 1);
        let snap = s.snapshot();
        assert_eq!((snap.center_x, snap.center_y), (12.0, 88.0));
    }

    #[test]
    fn old_snapshots_are_not_mutated() {
        let mut s = store();
        let before = s.snapshot();
        s.set_center(1.0, 2.0);
        assert_eq!((before.center_x, before.center_y), (50.0, 50.0));
        assert!(!Arc::ptr_eq(&before, &s.snapshot()));
    }

    // ── add ───────────────────────────────────────────────────────────────

    #[test]
    fn add_appends_at_fifty_percent() {
        let mut s = store();
        let before = s.snapshot();
        let id = s.add_color_stop("#123456");

        let cfg = s.config();
        assert_eq!(cfg.color_stops.len(), 3);
        assert_eq!(cfg.color_stops[..2], before.color_stops[..]);
        let added = &cfg.color_stops[2];
        assert_eq!(added.color, "#123456");
        assert_eq!(added.position, 50.0);
        assert_eq!(added.id, id);
        assert!(!before.color_stops.iter().any(|stop| stop.id == id));
    }

    #[test]
    fn added_ids_never_repeat() {
        let mut s = store();
        let mut seen: HashSet<StopId> = ids(&s).into_iter().collect();
        for i in 0..500 {
            let id = s.add_color_stop(format!("#{i:06x}"));
            assert!(seen.insert(id));
        }
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn update_position_touches_only_target() {
        let mut s = store();
        s.add_color_stop("green");
        let before = s.snapshot();
        let target = before.color_stops[1].id.clone();

        s.update_color_stop(&target, StopPatch::position(33.0)).unwrap();

        let after = s.snapshot();
        assert_eq!(after.color_stops[1].position, 33.0);
        assert_eq!(after.color_stops[1].color, before.color_stops[1].color);
        assert_eq!(after.color_stops[0], before.color_stops[0]);
        assert_eq!(after.color_stops[2], before.color_stops[2]);
        assert_eq!(after.kind, before.kind);
        assert_eq!(after.angle, before.angle);
    }

    #[test]
    fn update_miss_reports_and_publishes_nothing() {
        let mut s = store();
        let rev = s.revision();
        let before = s.snapshot();
        let err = s
            .update_color_stop(&StopId::from("missing"), StopPatch::color("red"))
            .unwrap_err();
        assert_eq!(err, StoreError::StopNotFound(StopId::from("missing")));
        assert_eq!(s.revision(), rev);
        assert!(Arc::ptr_eq(&before, &s.snapshot()));
    }

    // ── remove ────────────────────────────────────────────────────────────

    #[test]
    fn remove_twice_is_a_noop() {
        let mut s = store();
        let id = ids(&s)[0].clone();
        assert!(s.remove_color_stop(&id));
        let rev = s.revision();
        assert!(!s.remove_color_stop(&id));
        assert_eq!(s.revision(), rev);
        assert_eq!(s.config().color_stops.len(), 1);
    }

    #[test]
    fn remove_has_no_floor() {
        let mut s = store();
        for id in ids(&s) {
            assert!(s.remove_color_stop(&id));
        }
        assert!(s.config().color_stops.is_empty());
        assert_eq!(s.css(), "linear-gradient(90deg, )");
    }

    // ── replace / reset ───────────────────────────────────────────────────

    #[test]
    fn replace_reserves_loaded_ids() {
        let mut gen_twin = StopIdGen::seeded(99);
        let mut s = GradientStore::with_id_gen(StopIdGen::seeded(99));
        // Burn the two ids the store used for its initial config.
        gen_twin.next_id();
        gen_twin.next_id();
        let upcoming = gen_twin.next_id();

        let mut loaded = s.config().clone();
        loaded.color_stops.push(ColorStop::new(upcoming.clone(), "gold", 70.0));
        s.replace(loaded);

        let added = s.add_color_stop("teal");
        assert_ne!(added, upcoming);
    }

    #[test]
    fn replace_renames_repeated_ids() {
        let mut s = store();
        let mut loaded = s.config().clone();
        let first = loaded.color_stops[0].id.clone();
        loaded.color_stops.push(ColorStop::new(first.clone(), "gold", 70.0));
        s.replace(loaded);

        let now = ids(&s);
        let distinct: HashSet<_> = now.iter().collect();
        assert_eq!(distinct.len(), 3);
        assert_eq!(now[0], first);
        assert_eq!(s.config().color_stops[2].color, "gold");

        s.update_color_stop(&first, StopPatch::position(10.0)).unwrap();
        let positions: Vec<_> = s.config().color_stops.iter().map(|c| c.position).collect();
        assert_eq!(positions, [10.0, 100.0, 70.0]);

        assert!(s.remove_color_stop(&first));
        assert!(s.stop(&first).is_none());
        assert_eq!(s.config().color_stops.len(), 2);
    }

    #[test]
    fn reset_restores_initial_css() {
        let mut s = store();
        s.set_kind(GradientKind::Radial);
        s.add_color_stop("red");
        s.reset();
        assert_eq!(s.css(), "linear-gradient(90deg, #FF0080 0%, #7928CA 100%)");
    }
}
