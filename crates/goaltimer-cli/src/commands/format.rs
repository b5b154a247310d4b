use goaltimer_core::timer::try_format_countdown;

use super::CommandResult;

pub fn run(seconds: i64) -> CommandResult {
    println!("{}", try_format_countdown(seconds)?);
    Ok(0)
}
