//! Help screen shown once before the dashboard starts.

use std::io::{self, BufRead, Write};
use std::path::Path;

use hydrawatch_core::layout::CLEAR_SCREEN;
use hydrawatch_core::ColorMode;

/// Help text for the given settings.
pub fn welcome_message(timeout_secs: i64, replay: Option<&Path>, color: ColorMode) -> String {
    let mut msg = format!("Welcome to {}\n\n", color.title("HydraWatch"));
    msg.push_str("Live view of the Bluetooth devices seen nearby.\n");
    msg.push_str(&format!(
        "Devices leave this table {timeout_secs}s after they were last seen.\n"
    ));
    if let Some(path) = replay {
        msg.push_str(&format!("\nReplaying captured data from {}.\n", path.display()));
    }
    msg.push_str(
        "
The VERS column shows radio mode and version when known:
        CL/BR = Classic mode
        CL4.0 = Classic mode, version 4.0
        BTLE  = Bluetooth Low Energy mode
        LE4.1 = Bluetooth Low Energy mode, version 4.1

The RANGE column shows the estimated distance in meters.

Keys:
  s       sort on the next column to the right
  S       sort on the next column to the left
  r / R   reverse the sort order
  c       switch the optional column group
  Ctrl+C  quit

Press [Enter] to continue...
",
    );
    msg
}

/// Clear the screen, print `message` and block until a line is read.
///
/// End of input counts as Enter.
pub fn show_welcome<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
) -> io::Result<()> {
    write!(writer, "{CLEAR_SCREEN}{message}")?;
    writer.flush()?;
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(())
}
