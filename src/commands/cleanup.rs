//! `cleanup`: each manager's native maintenance routine

use super::{Context, fan_out, settle};
use crate::error::Result;
use crate::ui as output;

pub fn run(ctx: &Context) -> Result<()> {
    let settled = settle(fan_out(&ctx.managers, |manager| manager.cleanup()));

    for (manager, _) in &settled.done {
        output::success(&format!("{} cleaned up", manager.name()));
    }

    settled.finish()
}
