//! Startup and shutdown of the main view-model around the persisted parameters.

use std::rc::Rc;

use anyhow::{Context, Result};

use crate::{
    domain::communication_params::CommunicationParams,
    infra::{contracts::SettingsStore, settings::MAIN_PARAM_KEY},
    mvvm::{snapshot, DisposeGuard, ViewModel},
    usecases::contracts::MessagePresenter,
    view_models::main_window::MainWindowViewModel,
};

/// Reads the persisted parameters, failing when the stored blob is unreadable.
pub fn persisted_parameters(store: &dyn SettingsStore) -> Result<Option<CommunicationParams>> {
    store
        .get(MAIN_PARAM_KEY)
        .map(|raw| {
            snapshot::decode(&raw)
                .with_context(|| format!("setting '{MAIN_PARAM_KEY}' is not readable"))
        })
        .transpose()
}

/// Parameters for a new session: the persisted ones, or defaults when absent
/// or unreadable.
pub fn restore_parameters(store: &dyn SettingsStore) -> CommunicationParams {
    match persisted_parameters(store) {
        Ok(Some(params)) => {
            tracing::info!(address = %params.address(), "restored communication parameters");
            params
        }
        Ok(None) => {
            tracing::info!("no persisted parameters, starting from defaults");
            CommunicationParams::default()
        }
        Err(error) => {
            tracing::warn!(error = ?error, "persisted parameters ignored, starting from defaults");
            CommunicationParams::default()
        }
    }
}

pub fn persist_parameters(
    store: &mut dyn SettingsStore,
    params: &CommunicationParams,
) -> Result<()> {
    let raw = snapshot::encode(params)?;
    store.set(MAIN_PARAM_KEY, &raw);
    store.save()?;

    tracing::info!(address = %params.address(), "communication parameters persisted");
    Ok(())
}

pub fn start(
    store: &dyn SettingsStore,
    presenter: Rc<dyn MessagePresenter>,
) -> MainWindowViewModel {
    MainWindowViewModel::new(restore_parameters(store), presenter)
}

/// Persists the view-model's model, then disposes the view-model even when
/// persisting failed.
pub fn shutdown<V>(view_model: &mut V, store: &mut dyn SettingsStore) -> Result<()>
where
    V: ViewModel<Model = CommunicationParams> + ?Sized,
{
    let guard = DisposeGuard::new(view_model);
    persist_parameters(store, guard.model())
}

/// Forgets the persisted parameters. Returns whether anything was stored.
pub fn reset_parameters(store: &mut dyn SettingsStore) -> Result<bool> {
    let removed = store.remove(MAIN_PARAM_KEY);
    if removed {
        store.save()?;
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::stubs::{MemorySettingsStore, RecordingPresenter};

    fn presenter() -> Rc<dyn MessagePresenter> {
        Rc::new(RecordingPresenter::default())
    }

    fn custom_params() -> CommunicationParams {
        CommunicationParams {
            endpoint: "relay.internal".to_owned(),
            port: 9000,
            sender_name: "ops".to_owned(),
            archive_dir: String::new(),
            timeout_ms: 1_500,
        }
    }

    #[test]
    fn start_uses_defaults_without_persisted_state() {
        let store = MemorySettingsStore::default();

        let view_model = start(&store, presenter());

        assert_eq!(view_model.model(), &CommunicationParams::default());
    }

    #[test]
    fn shutdown_then_start_restores_an_equal_model() {
        let mut store = MemorySettingsStore::default();
        let mut first = MainWindowViewModel::new(custom_params(), presenter());

        shutdown(&mut first, &mut store).expect("shutdown must persist");
        let second = start(&store, presenter());

        assert_eq!(second.model(), &custom_params());
        assert_eq!(store.saves, 1);
        assert!(first.observable().is_disposed());
    }

    #[test]
    fn shutdown_disposes_even_when_saving_fails() {
        let mut store = MemorySettingsStore {
            fail_saves: true,
            ..MemorySettingsStore::default()
        };
        let mut view_model = MainWindowViewModel::new(custom_params(), presenter());
        let _subscription = view_model.subscribe(|_| {});

        let result = shutdown(&mut view_model, &mut store);

        assert!(result.is_err());
        assert!(view_model.observable().is_disposed());
        assert_eq!(view_model.observable().notifier().subscriber_count(), 0);
    }

    #[test]
    fn unreadable_blob_falls_back_to_defaults_but_is_reported_strictly() {
        let mut store = MemorySettingsStore::default();
        store.set(MAIN_PARAM_KEY, r#"{"port": "not a number"}"#);

        assert_eq!(restore_parameters(&store), CommunicationParams::default());
        let error = persisted_parameters(&store).expect_err("strict read must fail");
        assert!(error.to_string().contains(MAIN_PARAM_KEY));
    }

    #[test]
    fn persisted_blob_is_the_json_encoding() {
        let mut store = MemorySettingsStore::default();

        persist_parameters(&mut store, &custom_params()).expect("persist must succeed");

        let raw = store.get(MAIN_PARAM_KEY).expect("blob must be stored");
        assert!(raw.contains(r#""endpoint": "relay.internal""#));
        assert!(raw.contains(r#""port": 9000"#));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut store = MemorySettingsStore::default();
        persist_parameters(&mut store, &custom_params()).expect("persist must succeed");

        assert!(reset_parameters(&mut store).expect("reset must succeed"));
        assert!(!reset_parameters(&mut store).expect("second reset must succeed"));
        assert_eq!(store.saves, 2);
        assert_eq!(persisted_parameters(&store).expect("read must succeed"), None);
    }
}
