use std::fmt::Write;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use wrk_driver_core::prelude::WrkResult;

/// A progress bar that shows the user how much of the planned runtime is left.
///
/// The position is in whole seconds.
pub(crate) fn planned_runtime_bar(planned_runtime: Duration) -> WrkResult<ProgressBar> {
    let pb = ProgressBar::new(planned_runtime.as_secs());
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{wide_bar:.cyan/blue}] [{elapsed_precise} / {planned_runtime}]",
        )?
        .with_key("planned_runtime", {
            let hours = planned_runtime.as_secs() / 3600;
            let minutes = (planned_runtime.as_secs() % 3600) / 60;
            let seconds = planned_runtime.as_secs() % 60;
            move |_state: &ProgressState, w: &mut dyn Write| {
                let _ = write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds);
            }
        })
        .progress_chars("#>-"),
    );

    Ok(pb)
}
