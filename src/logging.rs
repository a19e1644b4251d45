use std::io::Write;

use env_logger::{Builder, Env};
use log::Level;

/// Progress goes to stderr as plain lines; other levels carry a prefix.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init() {
    let env = Env::default().filter_or("RUST_LOG", "info");
    Builder::from_env(env)
        .format(|buf, record| {
            if record.level() == Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(
                    buf,
                    "[{}] {}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                )
            }
        })
        .target(env_logger::Target::Stderr)
        .init();
}
