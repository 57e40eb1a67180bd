use crate::component::FileRenamer;
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub fn run_file_renamer(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    // 上一次中斷後重設信號
    shutdown_signal.store(false, Ordering::SeqCst);

    let mut renamer = FileRenamer::new(config.clone(), Arc::clone(shutdown_signal));

    if let Err(e) = renamer.run() {
        eprintln!("{} {}", style(t!("common.error_prefix")).red().bold(), e);
    }

    *config = renamer.into_config();

    pause(term)?;
    Ok(())
}
