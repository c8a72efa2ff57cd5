//! Boot log shown before the first menu frame

use tinypip_display::Screen;

use crate::app::runner::present;
use crate::traits::Board;

/// Lines printed one by one at power-on
pub const BOOT_LOG: [&str; 4] = [
    "[ OK ] INITIALIZING DISPLAY",
    "[ OK ] LOADING KERNEL MODULES",
    "[ OK ] MOUNTING FILESYSTEM",
    "[ OK ] STARTING TINYPIP OS",
];

/// Pause after each line
pub const LINE_MS: u32 = 400;

/// Pause after the last line
pub const FINAL_MS: u32 = 300;

/// First row of the log
const FIRST_ROW: usize = 2;

/// Print the boot log, one line per frame
pub fn run_boot_log(board: &mut Board<'_>, screen: &mut Screen) {
    screen.clear();
    for (i, line) in BOOT_LOG.iter().enumerate() {
        screen.set_text(FIRST_ROW + i, 1, line);
        present(screen, board);
        board.clock.sleep_ms(LINE_MS);
    }
    board.clock.sleep_ms(FINAL_MS);
}
