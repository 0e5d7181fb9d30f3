use std::sync::Once;

use crate::notify;

/// Route panics to the console before the wasm instance traps.
pub fn install_panic_hook(context: &'static str) {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(move |info| {
            let message = match info.location() {
                Some(loc) => format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                ),
                None => format!("panic: {info}"),
            };
            notify::error(context, &message);
        }));
    });
}
