use std::future::Future;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::{ApiError, Logger};

/// Progress of one independent fetch
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T: Clone + Default> LoadState<T> {
    /// Loaded value, or the empty value while loading or after a failure
    pub fn value_or_default(&self) -> T {
        self.ready().cloned().unwrap_or_default()
    }
}

pub struct UseLoadResult<T> {
    pub state: LoadState<T>,
    /// Fetch again, keeping the current value on screen until the reply
    pub reload: Callback<()>,
}

/// Run `fetch` on mount, whenever `deps` change and on every `reload`.
///
/// A failure is logged under `label` and only affects this state; a reply
/// that arrives after the component is gone is dropped with its handle.
#[hook]
pub fn use_load<T, D, F, Fut>(label: &'static str, deps: D, fetch: F) -> UseLoadResult<T>
where
    T: Clone + 'static,
    D: Clone + PartialEq + 'static,
    F: FnOnce(D) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let state = use_state(|| LoadState::<T>::Loading);
    let generation = use_state(|| 0u32);

    {
        let state = state.clone();
        use_effect_with((deps, *generation), move |(deps, _)| {
            let request = fetch(deps.clone());
            spawn_local(async move {
                match request.await {
                    Ok(value) => state.set(LoadState::Ready(value)),
                    Err(err) => {
                        Logger::error_with_component(label, &format!("load failed: {}", err));
                        state.set(LoadState::Failed(err.user_message(&format!("Failed to load {}", label))));
                    }
                }
            });
            || ()
        });
    }

    let reload = {
        let generation = generation.clone();
        Callback::from(move |_| generation.set(generation.wrapping_add(1)))
    };

    UseLoadResult {
        state: (*state).clone(),
        reload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_accessors() {
        let ready = LoadState::Ready(vec![1, 2]);
        assert_eq!(ready.ready(), Some(&vec![1, 2]));
        assert_eq!(ready.value_or_default(), vec![1, 2]);
        assert!(!ready.is_loading());

        let failed: LoadState<Vec<i32>> = LoadState::Failed("Failed to load bookings".to_string());
        assert_eq!(failed.error(), Some("Failed to load bookings"));
        assert!(failed.value_or_default().is_empty());
        assert!(LoadState::<u8>::Loading.is_loading());
    }
}
