use std::{cell::RefCell, rc::Rc};

use anyhow::Result;

use crate::{
    cli::{Cli, Command},
    domain,
    infra::{self, contracts::SettingsStore, settings::FileSettingsStore},
    mvvm, ui,
    usecases::{self, bootstrap, context::AppContext, lifecycle},
    view_models::{self, ViewModelHandle},
};

const NO_PARAMETERS_MESSAGE: &str = "No persisted communication parameters.";

pub fn run(cli: Cli) -> Result<()> {
    let context = bootstrap::bootstrap(cli.config.as_deref())?;
    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        mvvm = mvvm::module_name(),
        view_models = view_models::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let mut store = FileSettingsStore::open(context.settings_path())?;

    match cli.command_or_default() {
        Command::Run => run_shell(&context, &mut store)?,
        Command::ShowSettings => {
            println!("# {}", store.path().display());
            println!("{}", describe_settings(&store)?);
        }
        Command::Reset => {
            let removed = lifecycle::reset_parameters(&mut store)?;
            tracing::info!(removed, "settings reset");
            println!("{}", reset_message(removed));
        }
    }

    Ok(())
}

/// Runs the shell, then persists and disposes the main view-model whether or
/// not the shell exited cleanly.
fn run_shell(context: &AppContext, store: &mut dyn SettingsStore) -> Result<()> {
    let dialogs = ui::DialogQueue::default();
    let view_model = Rc::new(RefCell::new(lifecycle::start(
        store,
        Rc::new(dialogs.clone()),
    )));

    let shell_result = ui::shell::start(
        context,
        ViewModelHandle::MainWindow(Rc::clone(&view_model)),
        dialogs,
    );
    let shutdown_result = lifecycle::shutdown(&mut *view_model.borrow_mut(), store);

    if let Err(error) = &shutdown_result {
        tracing::error!(error = ?error, "failed to persist communication parameters");
    }
    shell_result?;
    shutdown_result
}

fn describe_settings(store: &dyn SettingsStore) -> Result<String> {
    match lifecycle::persisted_parameters(store)? {
        Some(params) => Ok(mvvm::snapshot::encode(&params)?),
        None => Ok(NO_PARAMETERS_MESSAGE.to_owned()),
    }
}

fn reset_message(removed: bool) -> &'static str {
    if removed {
        "Persisted communication parameters removed."
    } else {
        NO_PARAMETERS_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::communication_params::CommunicationParams,
        infra::{settings::MAIN_PARAM_KEY, stubs::MemorySettingsStore},
    };

    #[test]
    fn describe_settings_without_parameters() {
        let store = MemorySettingsStore::default();

        assert_eq!(
            describe_settings(&store).expect("empty store must describe"),
            NO_PARAMETERS_MESSAGE
        );
    }

    #[test]
    fn describe_settings_prints_the_persisted_json() {
        let mut store = MemorySettingsStore::default();
        let params = CommunicationParams {
            sender_name: "ops".to_owned(),
            ..CommunicationParams::default()
        };
        lifecycle::persist_parameters(&mut store, &params).expect("fixture must persist");

        let described = describe_settings(&store).expect("stored parameters must describe");

        assert!(described.contains(r#""sender_name": "ops""#));
        assert!(described.contains(r#""port": 7400"#));
    }

    #[test]
    fn describe_settings_reports_unreadable_blob() {
        let mut store = MemorySettingsStore::default();
        store.set(MAIN_PARAM_KEY, r#"{"timeout_ms": "soon"}"#);

        assert!(describe_settings(&store).is_err());
    }

    #[test]
    fn reset_message_tells_whether_anything_was_removed() {
        assert_ne!(reset_message(true), reset_message(false));
        assert_eq!(reset_message(false), NO_PARAMETERS_MESSAGE);
    }
}
