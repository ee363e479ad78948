#![no_main]
use libfuzzer_sys::fuzz_target;
use revapp_core::output::workflow_command;
use tracing::Level;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    for level in [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG] {
        let line = workflow_command(level, &text);
        // A single event must never split into several runner commands
        assert!(!line.contains('\n') && !line.contains('\r'));
    }
});
