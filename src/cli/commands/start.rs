use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::WorkdayClock;
use crate::errors::AppResult;
use crate::ui::messages;

/// Start the workday (now or at a given time), or print the saved start.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { at, print } = cmd {
        let clock = WorkdayClock::from_config(cfg)?;

        if *print {
            let dt = clock.start_datetime()?;
            messages::info(format!(
                "Current workday start time: {}",
                dt.format("%Y-%m-%d %H:%M:%S")
            ));
            return Ok(());
        }

        clock.set_start_time_manual(at.as_deref())?;
        let dt = clock.start_datetime()?;
        messages::success(format!(
            "Workday started at {} ({}).",
            at.as_deref().unwrap_or("now"),
            dt.format("%H:%M")
        ));
    }
    Ok(())
}
