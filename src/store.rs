//! Shared UI state between the 3D scene and the overlay.
//!
//! A plain state container with explicit change notification: each
//! subscriber owns the receiving end of a channel and drains it on the UI
//! thread. Setters only notify when the stored value actually changes.

use crate::planets::PlanetRecord;
use nalgebra::Point3;
use std::sync::mpsc;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum StoreEvent {
    /// Id of the newly selected project, if any.
    SelectionChanged(Option<u32>),
    FocusChanged(Option<Point3<f64>>),
    HoverChanged(Option<u32>),
}

#[derive(Default)]
pub struct UiStore {
    selected_project: Option<PlanetRecord>,
    focus_point: Option<Point3<f64>>,
    hovered_id: Option<u32>,
    subscribers: Vec<mpsc::Sender<StoreEvent>>,
}

impl UiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn emit(&mut self, event: StoreEvent) {
        // Receivers that were dropped are pruned here.
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    pub fn selected_project(&self) -> Option<&PlanetRecord> {
        self.selected_project.as_ref()
    }

    pub fn focus_point(&self) -> Option<Point3<f64>> {
        self.focus_point
    }

    pub fn hovered_id(&self) -> Option<u32> {
        self.hovered_id
    }

    pub fn set_selected_project(&mut self, project: Option<PlanetRecord>) {
        let old_id = self.selected_project.as_ref().map(|p| p.id);
        let new_id = project.as_ref().map(|p| p.id);
        self.selected_project = project;
        if old_id != new_id {
            log::debug!("Selected project {:?}", new_id);
            self.emit(StoreEvent::SelectionChanged(new_id));
        }
    }

    pub fn set_focus_point(&mut self, point: Option<Point3<f64>>) {
        if self.focus_point != point {
            self.focus_point = point;
            self.emit(StoreEvent::FocusChanged(point));
        }
    }

    /// Drops the selection but leaves the camera focus untouched.
    pub fn clear_project(&mut self) {
        self.set_selected_project(None);
    }

    /// Resets focus and selection together.
    pub fn clear_focus(&mut self) {
        self.set_focus_point(None);
        self.set_selected_project(None);
    }

    /// Focuses a planet: sets the focus point and the selection as a pair.
    pub fn focus_planet(&mut self, planet: &PlanetRecord, point: Point3<f64>) {
        self.set_focus_point(Some(point));
        self.set_selected_project(Some(planet.clone()));
    }

    pub fn set_hovered_id(&mut self, id: Option<u32>) {
        if self.hovered_id != id {
            self.hovered_id = id;
            self.emit(StoreEvent::HoverChanged(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::planets::generate;
    use proptest::prelude::*;

    fn planets() -> Vec<PlanetRecord> {
        generate(5, &Catalog::builtin())
    }

    fn drain(rx: &mpsc::Receiver<StoreEvent>) -> Vec<StoreEvent> {
        rx.try_iter().collect()
    }

    #[test]
    fn focus_planet_sets_pair_and_notifies() {
        let mut store = UiStore::new();
        let rx = store.subscribe();
        let planet = &planets()[1];
        let point = Point3::new(1.0, 2.0, 3.0);

        store.focus_planet(planet, point);
        assert_eq!(store.focus_point(), Some(point));
        assert_eq!(store.selected_project().map(|p| p.id), Some(2));
        assert_eq!(
            drain(&rx),
            vec![StoreEvent::FocusChanged(Some(point)), StoreEvent::SelectionChanged(Some(2))]
        );
    }

    #[test]
    fn clear_focus_is_idempotent() {
        let mut store = UiStore::new();
        let rx = store.subscribe();
        store.focus_planet(&planets()[0], Point3::new(6.0, 0.0, 0.0));
        drain(&rx);

        store.clear_focus();
        let once = (store.focus_point(), store.selected_project().cloned());
        assert_eq!(drain(&rx).len(), 2);

        store.clear_focus();
        let twice = (store.focus_point(), store.selected_project().cloned());
        assert_eq!(once, twice);
        assert_eq!(once, (None, None));
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn clear_project_keeps_focus() {
        let mut store = UiStore::new();
        let point = Point3::new(0.0, 0.0, 9.0);
        store.focus_planet(&planets()[0], point);
        store.clear_project();
        assert!(store.selected_project().is_none());
        assert_eq!(store.focus_point(), Some(point));
    }

    #[test]
    fn hover_notifies_on_change_only() {
        let mut store = UiStore::new();
        let rx = store.subscribe();
        store.set_hovered_id(Some(4));
        store.set_hovered_id(Some(4));
        store.set_hovered_id(None);
        assert_eq!(
            drain(&rx),
            vec![StoreEvent::HoverChanged(Some(4)), StoreEvent::HoverChanged(None)]
        );
        assert_eq!(store.hovered_id(), None);
    }

    #[test]
    fn every_subscriber_is_notified_and_dropped_ones_are_pruned() {
        let mut store = UiStore::new();
        let a = store.subscribe();
        let b = store.subscribe();
        store.set_hovered_id(Some(1));
        assert_eq!(drain(&a), drain(&b));

        drop(b);
        store.set_hovered_id(Some(2));
        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(drain(&a), vec![StoreEvent::HoverChanged(Some(2))]);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Focus(usize, f64),
        Clear,
        ClearProject,
        Hover(Option<u32>),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..5, -50.0f64..50.0).prop_map(|(i, x)| Op::Focus(i, x)),
            Just(Op::Clear),
            Just(Op::ClearProject),
            proptest::option::of(1u32..6).prop_map(Op::Hover),
        ]
    }

    proptest! {
        #[test]
        fn selection_implies_focus(ops in proptest::collection::vec(op(), 0..40)) {
            let planets = planets();
            let mut store = UiStore::new();
            for op in ops {
                match op {
                    Op::Focus(i, x) => store.focus_planet(&planets[i], Point3::new(x, 0.0, 1.0)),
                    Op::Clear => store.clear_focus(),
                    Op::ClearProject => store.clear_project(),
                    Op::Hover(id) => store.set_hovered_id(id),
                }
                if store.selected_project().is_some() {
                    prop_assert!(store.focus_point().is_some());
                }
            }
        }
    }
}
