use tokio::time::{interval, MissedTickBehavior};

use super::{CliResult, Context};

/// Poll the date until interrupted, clearing checkmarks on each new day.
pub fn run(ctx: &Context) -> CliResult {
    let mut app = ctx.open();
    let period = ctx.config.poll_interval();
    tracing::info!(
        since = %app.last_observed_date(),
        every_secs = period.as_secs(),
        "watching for date changes"
    );
    if !ctx.json {
        println!("Watching for the next day. Ctrl-C to stop.");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()?;

    runtime.block_on(async {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if app.poll_rollover() && !ctx.json {
                        println!("New day ({}): habit checkmarks cleared.", app.last_observed_date());
                    }
                    ctx.report_events(&mut app)?;
                }
                _ = &mut ctrl_c => break,
            }
        }
        CliResult::Ok(())
    })
}
