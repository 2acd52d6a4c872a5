use std::path::Path;

use crate::{
    infra::{
        self, config::FileConfigAdapter, contracts::ConfigAdapter, error::AppError,
        storage_layout::StorageLayout,
    },
    usecases::context::AppContext,
};

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let mut context = build_context(&FileConfigAdapter::new(config_path))?;
    let guard = infra::logging::init(&context.config.logging, &context.layout.log_dir())?;
    context.attach_log_guard(guard);

    tracing::debug!(
        settings = %context.settings_path().display(),
        "context bootstrapped"
    );
    Ok(context)
}

fn build_context(config_adapter: &dyn ConfigAdapter) -> Result<AppContext, AppError> {
    let config = config_adapter.load()?;

    let layout = StorageLayout::resolve()?;
    layout.ensure_dirs()?;

    Ok(AppContext::new(config, layout))
}
