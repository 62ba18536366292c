//! Reducer composition
//!
//! `combine_reducers` turns a set of named slice reducers into one reducer
//! over a mapping-shaped state with the same key set. Each slice reducer only
//! ever sees its own slice.

use crate::action::{self, Action, ActionTypes};
use crate::error::StoreError;
use crate::reducer::Reducer;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Mapping-shaped state produced by a combined reducer
///
/// Clones share the same map; `ptr_eq` tells whether a dispatch produced a
/// new mapping or handed back the previous one.
pub struct CombinedState<S> {
    slices: Rc<BTreeMap<String, S>>,
}

impl<S> CombinedState<S> {
    pub fn new(slices: BTreeMap<String, S>) -> Self {
        Self {
            slices: Rc::new(slices),
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slices, &other.slices)
    }
}

impl<S> Deref for CombinedState<S> {
    type Target = BTreeMap<String, S>;

    fn deref(&self) -> &Self::Target {
        &self.slices
    }
}

impl<S> Clone for CombinedState<S> {
    fn clone(&self) -> Self {
        Self {
            slices: Rc::clone(&self.slices),
        }
    }
}

impl<S> Default for CombinedState<S> {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

impl<S: PartialEq> PartialEq for CombinedState<S> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.slices == other.slices
    }
}

impl<S: fmt::Debug> fmt::Debug for CombinedState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.slices.iter()).finish()
    }
}

impl<K: Into<String>, S> FromIterator<(K, S)> for CombinedState<S> {
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, s)| (k.into(), s)).collect())
    }
}

type SliceFn<S, A> = dyn Fn(Option<&S>, &A) -> Option<S>;

/// Reducer for one slice of a combined state
///
/// Returning `None` means the reducer produced no state, which
/// `combine_reducers` rejects with `UndefinedReducerOutput`.
pub struct SliceReducer<S, A> {
    inner: Rc<SliceFn<S, A>>,
}

impl<S, A> SliceReducer<S, A> {
    pub fn new<F>(reduce: F) -> Self
    where
        F: Fn(Option<&S>, &A) -> Option<S> + 'static,
    {
        Self {
            inner: Rc::new(reduce),
        }
    }

    pub fn reduce(&self, state: Option<&S>, action: &A) -> Option<S> {
        (self.inner)(state, action)
    }
}

impl<S, A> Clone for SliceReducer<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Combine named slice reducers into one reducer
///
/// Every slice reducer is tried with `INIT` and an unknown action on an
/// absent state; one that produces no state fails the construction with
/// `UndefinedReducerOutput`. The combined reducer hands back the previous
/// mapping unchanged when no slice changed and the key set is the same.
pub fn combine_reducers<S, A, K, I>(slices: I) -> Result<Reducer<CombinedState<S>, A>, StoreError>
where
    S: Clone + PartialEq + 'static,
    A: Action,
    K: Into<String>,
    I: IntoIterator<Item = (K, SliceReducer<S, A>)>,
{
    let reducers: BTreeMap<String, SliceReducer<S, A>> = slices
        .into_iter()
        .map(|(key, reducer)| (key.into(), reducer))
        .collect();

    if reducers.is_empty() {
        log::warn!("combine_reducers called without any slice reducer");
    }
    assert_reducer_shape(&reducers)?;

    let unexpected_keys_cache = RefCell::new(BTreeSet::new());

    Ok(Reducer::fallible(move |state: Option<&CombinedState<S>>, action: &A| {
        if let Some(state) = state {
            warn_unexpected_keys(state, &reducers, action, &unexpected_keys_cache);
        }

        let mut has_changed = false;
        let mut next_state = BTreeMap::new();

        for (key, reducer) in &reducers {
            let previous = state.and_then(|s| s.get(key));
            let next = reducer
                .reduce(previous, action)
                .ok_or_else(|| StoreError::UndefinedReducerOutput {
                    key: key.clone(),
                    action_type: action::describe(action),
                })?;

            has_changed = has_changed || previous != Some(&next);
            next_state.insert(key.clone(), next);
        }

        match state {
            Some(state) if !has_changed && state.len() == reducers.len() => Ok(state.clone()),
            _ => Ok(CombinedState::new(next_state)),
        }
    }))
}

fn assert_reducer_shape<S, A: Action>(
    reducers: &BTreeMap<String, SliceReducer<S, A>>,
) -> Result<(), StoreError> {
    for (key, reducer) in reducers {
        for check in [ActionTypes::Init, ActionTypes::ProbeUnknownAction] {
            if reducer.reduce(None, &A::reserved(check)).is_none() {
                return Err(StoreError::UndefinedReducerOutput {
                    key: key.clone(),
                    action_type: check.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Warn once per key about state no slice reducer manages
///
/// Those keys are dropped from the next state.
fn warn_unexpected_keys<S, A: Action>(
    state: &CombinedState<S>,
    reducers: &BTreeMap<String, SliceReducer<S, A>>,
    action: &A,
    cache: &RefCell<BTreeSet<String>>,
) {
    if action.reserved_kind() == Some(ActionTypes::Replace) {
        return;
    }

    let mut cache = cache.borrow_mut();
    for key in state.keys() {
        if !reducers.contains_key(key) && cache.insert(key.clone()) {
            log::warn!(
                "Unexpected key \"{}\" found in state received by the combined reducer, \
                 expected one of {:?}. Unexpected keys will be ignored.",
                key,
                reducers.keys().collect::<Vec<_>>()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::create_store;
    use serde_json::{json, Value};

    fn counter() -> SliceReducer<Value, Value> {
        SliceReducer::new(|state: Option<&Value>, action: &Value| {
            let count = state.and_then(Value::as_i64).unwrap_or(0);
            Some(match action["type"].as_str() {
                Some("INC") => json!(count + 1),
                _ => state.cloned().unwrap_or(json!(count)),
            })
        })
    }

    fn todos() -> SliceReducer<Value, Value> {
        SliceReducer::new(|state: Option<&Value>, action: &Value| {
            let mut todos = state.cloned().unwrap_or_else(|| json!([]));
            if action["type"] == "ADD_TODO" {
                todos.as_array_mut()?.push(action["text"].clone());
            }
            Some(todos)
        })
    }

    fn combined() -> Reducer<CombinedState<Value>, Value> {
        combine_reducers([("counter", counter()), ("todos", todos())]).unwrap()
    }

    #[test]
    fn test_each_slice_gets_its_own_state() {
        let reducer = combined();
        let state: CombinedState<Value> =
            [("counter", json!(3)), ("todos", json!(["a"]))].into_iter().collect();

        let next = reducer
            .reduce(Some(&state), &json!({ "type": "ADD_TODO", "text": "b" }))
            .unwrap();

        assert_eq!(next["counter"], json!(3));
        assert_eq!(next["todos"], json!(["a", "b"]));
        assert!(!next.ptr_eq(&state));
    }

    #[test]
    fn test_unchanged_slices_keep_previous_mapping() {
        let reducer = combined();
        let state: CombinedState<Value> =
            [("counter", json!(1)), ("todos", json!([]))].into_iter().collect();

        let next = reducer
            .reduce(Some(&state), &json!({ "type": "SOMETHING_ELSE" }))
            .unwrap();

        assert!(next.ptr_eq(&state));
    }

    #[test]
    fn test_missing_state_builds_defaults() {
        let reducer = combined();

        let state = reducer.reduce(None, &Value::reserved(ActionTypes::Init)).unwrap();

        assert_eq!(state["counter"], json!(0));
        assert_eq!(state["todos"], json!([]));
    }

    #[test]
    fn test_missing_slice_counts_as_change() {
        let reducer = combined();
        let state: CombinedState<Value> = [("counter", json!(1))].into_iter().collect();

        let next = reducer.reduce(Some(&state), &json!({ "type": "NOOP" })).unwrap();

        assert!(!next.ptr_eq(&state));
        assert_eq!(next["todos"], json!([]));
    }

    #[test]
    fn test_unexpected_keys_are_dropped() {
        let reducer = combined();
        let state: CombinedState<Value> = [
            ("counter", json!(1)),
            ("todos", json!([])),
            ("legacy", json!(true)),
        ]
        .into_iter()
        .collect();

        let next = reducer.reduce(Some(&state), &json!({ "type": "NOOP" })).unwrap();

        assert!(!next.ptr_eq(&state));
        assert!(!next.contains_key("legacy"));
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_shape_check_rejects_reducer_without_default() {
        let lazy = SliceReducer::new(|state: Option<&Value>, _action: &Value| state.cloned());

        let result = combine_reducers([("counter", counter()), ("lazy", lazy)]);

        match result {
            Err(StoreError::UndefinedReducerOutput { key, action_type }) => {
                assert_eq!(key, "lazy");
                assert_eq!(action_type, "@@reflux/INIT");
            }
            other => panic!("expected UndefinedReducerOutput, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_shape_check_rejects_reducer_handling_only_init() {
        let init_only = SliceReducer::new(|_state: Option<&Value>, action: &Value| {
            (action.reserved_kind() == Some(ActionTypes::Init)).then(|| json!(0))
        });

        assert!(matches!(
            combine_reducers([("init_only", init_only)]),
            Err(StoreError::UndefinedReducerOutput { .. })
        ));
    }

    #[test]
    fn test_undefined_output_at_dispatch_fails_dispatch() {
        let picky = SliceReducer::new(|state: Option<&Value>, action: &Value| {
            if action["type"] == "FORGET" {
                None
            } else {
                Some(state.cloned().unwrap_or(json!("kept")))
            }
        });
        let reducer = combine_reducers([("picky", picky), ("counter", counter())]).unwrap();
        let store = create_store(reducer, None, None).unwrap();
        let before = store.get_state().unwrap();

        let result = store.dispatch(json!({ "type": "FORGET" }));

        assert!(matches!(
            result,
            Err(StoreError::UndefinedReducerOutput { ref key, .. }) if key == "picky"
        ));
        assert!(store.get_state().unwrap().ptr_eq(&before));
    }

    #[test]
    fn test_combined_reducer_drives_a_store() {
        let preloaded: CombinedState<Value> = [("counter", json!(10))].into_iter().collect();
        let store = create_store(combined(), Some(preloaded), None).unwrap();

        store.dispatch(json!({ "type": "INC" })).unwrap();
        store
            .dispatch(json!({ "type": "ADD_TODO", "text": "ship it" }))
            .unwrap();

        let state = store.get_state().unwrap();
        assert_eq!(state["counter"], json!(11));
        assert_eq!(state["todos"], json!(["ship it"]));
    }

    #[test]
    fn test_replace_reducer_keeps_shared_slices() {
        let store = create_store(combined(), None, None).unwrap();
        store.dispatch(json!({ "type": "INC" })).unwrap();

        let extended = combine_reducers([
            ("counter", counter()),
            ("todos", todos()),
            ("visibility", SliceReducer::new(|state: Option<&Value>, _: &Value| {
                Some(state.cloned().unwrap_or(json!("all")))
            })),
        ])
        .unwrap();
        store.replace_reducer(extended).unwrap();

        let state = store.get_state().unwrap();
        assert_eq!(state["counter"], json!(1));
        assert_eq!(state["visibility"], json!("all"));
    }
}
