#![no_main]
use libfuzzer_sys::fuzz_target;
use revapp_core::event::EventPayload;

fuzz_target!(|data: &[u8]| {
    // Fuzz payload parsing and context extraction
    if let Ok(payload) = EventPayload::from_slice(data) {
        if let Ok(ctx) = payload.into_context(None, "create") {
            let _ = ctx.tarball_url();
        }
    }
});
